use crate::error::{Result, StorageError};
use crate::layout::STORAGE_VERSION;
use crate::stores::{ServerInfoStore, StorageStatusStore};

/// What a storage tree holds, as far as its status record tells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageState {
    /// No status record: nothing was ever synchronized.
    NeverSynchronized,
    /// Written by an incompatible version; nothing else in the tree may be read.
    Stale(StaleStatus),
    UpToDate(SyncStatus),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaleStatus {
    pub found_version: String,
    pub last_update_millis: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncStatus {
    pub last_update_millis: i64,
    pub client_version: String,
    /// Version reported by the server at the last synchronization, when known.
    pub server_version: Option<String>,
}

impl StorageState {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }

    pub fn is_synchronized(&self) -> bool {
        !matches!(self, Self::NeverSynchronized)
    }
}

/// Decides whether a storage tree can be used by this build.
#[derive(Debug)]
pub struct StorageStatusReader<'a> {
    status: &'a StorageStatusStore,
    server_info: Option<&'a ServerInfoStore>,
}

impl<'a> StorageStatusReader<'a> {
    pub fn new(status: &'a StorageStatusStore, server_info: Option<&'a ServerInfoStore>) -> Self {
        Self {
            status,
            server_info,
        }
    }

    pub fn read(&self) -> Result<StorageState> {
        let status = match self.status.get() {
            Ok(status) => status,
            Err(StorageError::MissingStorage { .. }) => return Ok(StorageState::NeverSynchronized),
            Err(err) => return Err(err),
        };

        if status.storage_version != STORAGE_VERSION {
            tracing::debug!(
                target: "tether.storage",
                expected = STORAGE_VERSION,
                found = %status.storage_version,
                "storage is stale"
            );
            return Ok(StorageState::Stale(StaleStatus {
                found_version: status.storage_version,
                last_update_millis: status.update_timestamp,
            }));
        }

        let server_version = match self.server_info {
            Some(store) => match store.get() {
                Ok(infos) => Some(infos.version),
                Err(StorageError::MissingStorage { .. }) => None,
                Err(err) => return Err(err),
            },
            None => None,
        };

        Ok(StorageState::UpToDate(SyncStatus {
            last_update_millis: status.update_timestamp,
            client_version: status.client_version,
            server_version,
        }))
    }

    pub fn is_stale(&self) -> Result<bool> {
        Ok(self.read()?.is_stale())
    }

    /// Fail fast unless the storage was synchronized by a compatible version.
    pub fn ensure_up_to_date(&self) -> Result<SyncStatus> {
        match self.read()? {
            StorageState::UpToDate(sync) => Ok(sync),
            StorageState::NeverSynchronized => Err(StorageError::missing(self.status.path())),
            StorageState::Stale(stale) => Err(StorageError::StaleStorage {
                expected: STORAGE_VERSION.to_string(),
                found: stale.found_version,
            }),
        }
    }
}
