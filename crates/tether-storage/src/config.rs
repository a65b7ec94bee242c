use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the storage root.
pub const STORAGE_DIR_ENV: &str = "TETHER_STORAGE_DIR";

/// Selects where connection storages live on disk.
///
/// ```toml
/// storage_root = "/var/cache/tether"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Override the storage root. Defaults to `~/.tether/storage`.
    pub storage_root: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: Some(storage_root.into()),
        }
    }

    pub fn from_env() -> Self {
        Self {
            storage_root: std::env::var_os(STORAGE_DIR_ENV).map(PathBuf::from),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| StorageError::io(path, err))?;
        Self::from_toml(path, &text)
    }

    fn from_toml(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| StorageError::InvalidConfig {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }

    /// The configured root, or the per-user default.
    pub fn storage_root(&self) -> Result<PathBuf> {
        match &self.storage_root {
            Some(root) => Ok(root.clone()),
            None => default_storage_root(),
        }
    }
}

pub(crate) fn default_storage_root() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or(StorageError::MissingHomeDir)?;

    Ok(home.join(".tether").join("storage"))
}
