use crate::codec::{decode_message, encode_message};
use crate::error::{Result, StorageError};
use crate::guard::RwGuard;
use crate::object_store::{FixedPath, ObjectStore};
use crate::storage_root::StorageRoot;
use prost::Message;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// One single-message file at a well-known path under a storage root.
///
/// Every access takes this record's own guard first, then the root's shared
/// action, in that order, so concurrent writers of the same record never
/// interleave and a tree swap waits for both.
pub struct RecordStore<M> {
    root: Arc<StorageRoot>,
    guard: RwGuard,
    objects: ObjectStore<(), M, FixedPath>,
}

impl<M: Message + Default> RecordStore<M> {
    pub fn new(root: Arc<StorageRoot>, relative_path: impl AsRef<Path>) -> Self {
        let path = root.path().join(relative_path);
        Self {
            root,
            guard: RwGuard::new(),
            objects: ObjectStore::new(FixedPath(path), decode_message::<M>, encode_message::<M>),
        }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.objects.path_for(&())
    }

    /// Replace the whole record.
    pub fn store(&self, value: &M) -> Result<()> {
        self.guard.write(|| {
            self.root.write_action(|_| self.objects.write(&(), value))?;
            tracing::debug!(
                target: "tether.storage",
                path = %self.path().display(),
                "stored record"
            );
            Ok(())
        })
    }

    pub fn read(&self) -> Result<Option<M>> {
        self.guard
            .read(|| self.root.read_action(|_| self.objects.read(&())))
    }

    /// Like [`RecordStore::read`], but absence means the storage was never synchronized.
    pub fn read_required(&self) -> Result<M> {
        self.read()?
            .ok_or_else(|| StorageError::missing(self.path()))
    }

    /// Like [`RecordStore::read`], but absence reads as an empty record.
    pub fn read_or_default(&self) -> Result<M> {
        Ok(self.read()?.unwrap_or_default())
    }
}

impl<M> fmt::Debug for RecordStore<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}
