use crate::error::{Result, StorageError};
use crate::guard::RwGuard;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One storage subtree (a connection's `global/`, or one project) and the
/// guard shared by everything touching it.
///
/// Individual reads and writes take the guard in shared mode and may run in
/// parallel; per-record safety is the typed stores' job. Only
/// [`StorageRoot::replace_storage_with`] and deletions take it exclusively, so
/// no reader ever sees a mix of the old and the new tree.
#[derive(Debug)]
pub struct StorageRoot {
    path: PathBuf,
    guard: RwGuard,
}

impl StorageRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: RwGuard::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_action<T>(&self, action: impl FnOnce(&Path) -> T) -> T {
        self.guard.read(|| action(&self.path))
    }

    /// Shared mode as well: writing one file only has to exclude a full swap.
    pub fn write_action<T>(&self, action: impl FnOnce(&Path) -> T) -> T {
        self.guard.read(|| action(&self.path))
    }

    /// Create an empty staging directory next to the root.
    ///
    /// Staying under the same parent keeps the final rename on one volume. The
    /// directory is removed on drop unless it was swapped in.
    pub fn create_staging_dir(&self) -> Result<tempfile::TempDir> {
        let parent = self.parent()?;
        fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;

        let mut prefix = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        prefix.push(".staging-");
        tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(parent)
            .map_err(|err| StorageError::io(parent, err))
    }

    /// Run `action` with the guard held exclusively: no other action on this
    /// root is in flight and none starts until it returns.
    pub(crate) fn exclusive_action<T>(&self, action: impl FnOnce(&Path) -> T) -> T {
        self.guard.write(|| action(&self.path))
    }

    /// Swap a fully built staging tree in place of the current one.
    ///
    /// Waits for every in-flight action to finish and blocks new ones until
    /// the swap is done. `staging_dir` must live on the same volume as the
    /// root, see [`StorageRoot::create_staging_dir`].
    pub fn replace_storage_with(&self, staging_dir: &Path) -> Result<()> {
        self.exclusive_action(|_| self.swap_in(staging_dir))
    }

    /// Remove the whole subtree. Missing trees are fine.
    pub fn delete(&self) -> Result<()> {
        self.exclusive_action(remove_dir_if_exists)
    }

    pub fn exists(&self) -> bool {
        self.read_action(|path| path.is_dir())
    }

    /// Must run under [`StorageRoot::exclusive_action`].
    fn swap_in(&self, staging_dir: &Path) -> Result<()> {
        remove_dir_if_exists(&self.path)?;
        let parent = self.parent()?;
        fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        if let Err(err) = fs::rename(staging_dir, &self.path) {
            if let Err(cleanup) = remove_dir_if_exists(staging_dir) {
                tracing::warn!(
                    target: "tether.storage",
                    path = %staging_dir.display(),
                    error = %cleanup,
                    "failed to clean up staging directory"
                );
            }
            return Err(StorageError::io(&self.path, err));
        }
        tracing::debug!(
            target: "tether.storage",
            path = %self.path.display(),
            "replaced storage tree"
        );
        Ok(())
    }

    fn parent(&self) -> Result<&Path> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
            _ => Err(StorageError::io(
                &self.path,
                io::Error::other("storage root has no parent directory"),
            )),
        }
    }
}

pub(crate) fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(StorageError::io(path, err)),
    }
}
