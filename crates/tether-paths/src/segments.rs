use std::path::{Component, Path, PathBuf};

/// Split a relative path into its name segments.
///
/// Root, drive prefixes and `.` components are dropped; `..` is kept verbatim
/// so that it can still take part in suffix matching.
pub fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect()
}

/// Join segments with `/`, the separator used by server-side file keys.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push('/');
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Render `path` with `/` separators regardless of the host platform.
pub fn to_slash(path: &Path) -> String {
    join_segments(&path_segments(path))
}

pub(crate) fn segments_to_path(segments: &str) -> PathBuf {
    if segments.is_empty() {
        PathBuf::new()
    } else {
        segments.split('/').collect()
    }
}
