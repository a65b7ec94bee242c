use super::record::RecordStore;
use crate::error::Result;
use crate::layout::{STORAGE_STATUS_PB, STORAGE_VERSION};
use crate::proto::StorageStatus;
use crate::storage_root::StorageRoot;
use crate::util::now_millis;
use std::path::PathBuf;
use std::sync::Arc;

/// Version stamp written when a synchronization completes.
#[derive(Debug)]
pub struct StorageStatusStore {
    record: RecordStore<StorageStatus>,
}

impl StorageStatusStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, STORAGE_STATUS_PB),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.record.path()
    }

    pub fn store(&self, status: &StorageStatus) -> Result<()> {
        self.record.store(status)
    }

    /// Stamp the storage with this build's [`STORAGE_VERSION`] and the current time.
    pub fn store_current(&self) -> Result<StorageStatus> {
        let status = current_status();
        self.store(&status)?;
        Ok(status)
    }

    /// `MissingStorage` when the storage was never synchronized.
    pub fn get(&self) -> Result<StorageStatus> {
        self.record.read_required()
    }
}

pub fn current_status() -> StorageStatus {
    StorageStatus {
        storage_version: STORAGE_VERSION.to_string(),
        client_version: env!("CARGO_PKG_VERSION").to_string(),
        update_timestamp: now_millis(),
    }
}
