use std::collections::HashMap;

/// Index of an interned candidate prefix.
pub(crate) type PrefixId = u32;

/// Trie over server paths keyed by segments in reverse order (file name first).
///
/// Nodes live in a flat arena and refer to each other by index. Every node
/// records the distinct leading segments ("candidate prefixes") left over by
/// each inserted path whose reversed walk passes through it.
#[derive(Debug)]
pub(crate) struct ReversePathTree {
    nodes: Vec<Node>,
    prefixes: PrefixInterner,
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<String, usize>,
    prefixes: Vec<PrefixId>,
    terminal: bool,
}

/// Result of walking an IDE path through the tree.
#[derive(Debug)]
pub(crate) struct SuffixMatch<'a> {
    pub(crate) match_len: usize,
    pub(crate) prefixes: &'a [PrefixId],
}

const ROOT: usize = 0;

impl ReversePathTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            prefixes: PrefixInterner::default(),
        }
    }

    pub(crate) fn insert(&mut self, segments: &[String]) {
        if segments.is_empty() {
            return;
        }

        // Walk (and grow) the reversed path first so duplicates can be skipped:
        // a path inserted twice must not count its prefixes twice.
        let mut walk = Vec::with_capacity(segments.len());
        let mut current = ROOT;
        for segment in segments.iter().rev() {
            let existing = self.nodes[current].children.get(segment).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(segment.clone(), child);
                    child
                }
            };
            walk.push(current);
        }

        if std::mem::replace(&mut self.nodes[current].terminal, true) {
            return;
        }

        // The node reached after matching `depth` trailing segments keeps the
        // first `len - depth` segments as its candidate prefix.
        let ids = self.prefixes.intern_all_leading(segments);
        for (depth_minus_one, node) in walk.into_iter().enumerate() {
            let remaining = segments.len() - (depth_minus_one + 1);
            self.nodes[node].prefixes.push(ids[remaining]);
        }
    }

    /// Match `segments` from the end as far as the tree allows.
    pub(crate) fn longest_suffix_match(&self, segments: &[String]) -> SuffixMatch<'_> {
        let mut current = ROOT;
        let mut match_len = 0;
        for segment in segments.iter().rev() {
            match self.nodes[current].children.get(segment) {
                Some(&child) => {
                    current = child;
                    match_len += 1;
                }
                None => break,
            }
        }
        SuffixMatch {
            match_len,
            prefixes: &self.nodes[current].prefixes,
        }
    }

    pub(crate) fn prefix(&self, id: PrefixId) -> &InternedPrefix {
        self.prefixes.get(id)
    }
}

#[derive(Debug)]
pub(crate) struct InternedPrefix {
    pub(crate) text: String,
    pub(crate) segment_count: usize,
}

#[derive(Debug, Default)]
struct PrefixInterner {
    entries: Vec<InternedPrefix>,
    by_text: HashMap<String, PrefixId>,
}

impl PrefixInterner {
    /// Intern `""`, `s0`, `s0/s1`, ... up to (but excluding) the full path.
    ///
    /// The returned vector is indexed by the number of leading segments kept.
    fn intern_all_leading(&mut self, segments: &[String]) -> Vec<PrefixId> {
        let mut ids = Vec::with_capacity(segments.len());
        let mut text = String::new();
        for count in 0..segments.len() {
            if count > 0 {
                if count > 1 {
                    text.push('/');
                }
                text.push_str(&segments[count - 1]);
            }
            ids.push(self.intern(&text, count));
        }
        ids
    }

    fn intern(&mut self, text: &str, segment_count: usize) -> PrefixId {
        if let Some(&id) = self.by_text.get(text) {
            return id;
        }
        let id = self.entries.len() as PrefixId;
        self.entries.push(InternedPrefix {
            text: text.to_string(),
            segment_count,
        });
        self.by_text.insert(text.to_string(), id);
        id
    }

    fn get(&self, id: PrefixId) -> &InternedPrefix {
        &self.entries[id as usize]
    }
}
