use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors produced by the local storage of mirrored server data.
///
/// None of these are retried internally; they surface to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The record was never written: the storage has not been synchronized yet.
    #[error("storage not found at {path}; an update is required")]
    MissingStorage { path: PathBuf },

    /// The storage was written by an incompatible version and must be synchronized again.
    #[error("stale storage: expected version {expected}, found {found}; an update is required")]
    StaleStorage { expected: String, found: String },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },

    #[error("invalid storage configuration {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// A connection id, project key or branch name that cannot name a storage directory.
    #[error("empty {kind} is not a valid storage key")]
    InvalidKey { kind: &'static str },

    #[error("failed to determine home directory for default storage path")]
    MissingHomeDir,
}

impl StorageError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn missing(path: impl AsRef<Path>) -> Self {
        Self::MissingStorage {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether the caller has to run a synchronization before using the storage.
    pub fn requires_update(&self) -> bool {
        matches!(self, Self::MissingStorage { .. } | Self::StaleStorage { .. })
    }
}
