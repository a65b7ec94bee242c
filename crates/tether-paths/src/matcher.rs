use crate::prefix::PrefixPair;
use crate::segments::{join_segments, path_segments, segments_to_path};
use crate::tree::{PrefixId, ReversePathTree};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

/// Relative difference under which two accumulated scores count as equal.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Find the [`PrefixPair`] that best maps `ide_paths` onto `server_paths`.
///
/// Every IDE path is matched from its file name backwards against the server
/// paths. A path whose last `n` segments match contributes `n / k` to each of
/// the `k` candidate `(ide prefix, server prefix)` pairs it supports, so deep,
/// unambiguous matches outweigh common file names, and hypotheses backed by
/// many files outweigh a single lucky hit.
///
/// Totals within [`SCORE_TOLERANCE`] (relative) of the best one are tied.
/// Ties are broken in favour of the server prefix with more segments, then the
/// lexicographically smallest server prefix, then the smallest IDE prefix.
/// When nothing matches at all, both roots are assumed identical.
pub fn match_prefixes<S, I>(server_paths: S, ide_paths: I) -> PrefixPair
where
    S: IntoIterator,
    S::Item: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut tree = ReversePathTree::new();
    for path in server_paths {
        tree.insert(&path_segments(path.as_ref()));
    }

    let mut scores: HashMap<(String, PrefixId), f64> = HashMap::new();
    let mut ide_count = 0usize;
    for path in ide_paths {
        ide_count += 1;
        let segments = path_segments(path.as_ref());
        let found = tree.longest_suffix_match(&segments);
        if found.match_len == 0 || found.prefixes.is_empty() {
            continue;
        }

        let ide_prefix = join_segments(&segments[..segments.len() - found.match_len]);
        let score = found.match_len as f64 / found.prefixes.len() as f64;
        for &server_prefix in found.prefixes {
            *scores
                .entry((ide_prefix.clone(), server_prefix))
                .or_insert(0.0) += score;
        }
    }

    // Sums of `n / k` are inexact: totals equal on paper can differ in the
    // last bits, so anything within tolerance of the best total is a tie.
    let top = scores.values().copied().fold(0.0, f64::max);
    let best = scores
        .iter()
        .filter(|(_, score)| top - **score <= SCORE_TOLERANCE * top)
        .max_by(|(a, _), (b, _)| compare_tied(&tree, a, b));

    let Some(((ide_prefix, server_prefix), score)) = best else {
        tracing::debug!(
            target: "tether.paths",
            ide_count,
            "no common file suffix between IDE and server paths; assuming identical roots"
        );
        return PrefixPair::default();
    };

    let server_prefix = &tree.prefix(*server_prefix).text;
    tracing::debug!(
        target: "tether.paths",
        ide_prefix = %ide_prefix,
        server_prefix = %server_prefix,
        score,
        candidates = scores.len(),
        "resolved path prefixes"
    );
    PrefixPair {
        ide_prefix: segments_to_path(ide_prefix),
        server_prefix: segments_to_path(server_prefix),
    }
}

/// Ordering among equally scored candidates; the preferred one compares as `Greater`.
fn compare_tied(
    tree: &ReversePathTree,
    (a_ide, a_server): &(String, PrefixId),
    (b_ide, b_server): &(String, PrefixId),
) -> Ordering {
    let a_prefix = tree.prefix(*a_server);
    let b_prefix = tree.prefix(*b_server);
    a_prefix
        .segment_count
        .cmp(&b_prefix.segment_count)
        .then_with(|| b_prefix.text.cmp(&a_prefix.text))
        .then_with(|| b_ide.cmp(a_ide))
}
