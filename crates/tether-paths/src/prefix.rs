use crate::segments::path_segments;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Correspondence between the IDE root and the server scan root.
///
/// `ide_prefix` is stripped from IDE-relative paths and replaced by
/// `server_prefix` to obtain server-relative paths (and vice versa). The
/// default pair (both empty) means both sides share the same root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefixPair {
    pub ide_prefix: PathBuf,
    pub server_prefix: PathBuf,
}

impl PrefixPair {
    pub fn new(ide_prefix: impl Into<PathBuf>, server_prefix: impl Into<PathBuf>) -> Self {
        Self {
            ide_prefix: ide_prefix.into(),
            server_prefix: server_prefix.into(),
        }
    }

    /// Both roots coincide; translation is the identity.
    pub fn is_identity(&self) -> bool {
        self.ide_prefix.as_os_str().is_empty() && self.server_prefix.as_os_str().is_empty()
    }

    /// Translate an IDE-relative path into the server path space.
    ///
    /// Returns `None` when `ide_path` does not live under `ide_prefix`.
    pub fn to_server_path(&self, ide_path: &Path) -> Option<PathBuf> {
        translate(ide_path, &self.ide_prefix, &self.server_prefix)
    }

    /// Translate a server-relative path into the IDE path space.
    ///
    /// Returns `None` when `server_path` does not live under `server_prefix`.
    pub fn to_ide_path(&self, server_path: &Path) -> Option<PathBuf> {
        translate(server_path, &self.server_prefix, &self.ide_prefix)
    }
}

/// Compares segments the way [`crate::match_prefixes`] sees them, so a `./`
/// or a leading root does not defeat a binding it produced.
fn translate(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    let segments = path_segments(path);
    let from = path_segments(from);
    let rest = segments.strip_prefix(from.as_slice())?;
    let mut translated: PathBuf = path_segments(to).into_iter().collect();
    translated.extend(rest);
    Some(translated)
}
