use crate::config::StorageConfig;
use crate::error::Result;
use crate::key::{encode_for_fs, require_key};
use crate::layout::{GLOBAL_DIR, PROJECTS_DIR};
use crate::storage_root::{remove_dir_if_exists, StorageRoot};
use crate::stores::{GlobalStores, ProjectStores};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Storage of one server connection: `<storage root>/<encoded connection id>/`.
///
/// Every tree below it gets exactly one [`StorageRoot`], handed out by this
/// value. Stores opened for the same project through the same
/// `ConnectionStorage` therefore share one guard; opening a second
/// `ConnectionStorage` for the same connection id gives up that guarantee.
#[derive(Debug)]
pub struct ConnectionStorage {
    connection_id: String,
    path: PathBuf,
    global: Arc<GlobalStores>,
    projects: Mutex<HashMap<String, Arc<ProjectStores>>>,
}

impl ConnectionStorage {
    pub fn open(config: &StorageConfig, connection_id: impl Into<String>) -> Result<Self> {
        Self::at(config.storage_root()?, connection_id)
    }

    /// Storage of `connection_id` under an explicit storage root.
    pub fn at(storage_root: impl AsRef<Path>, connection_id: impl Into<String>) -> Result<Self> {
        let connection_id = connection_id.into();
        require_key("connection id", &connection_id)?;
        let path = storage_root.as_ref().join(encode_for_fs(&connection_id));
        let global = Arc::new(GlobalStores::new(Arc::new(StorageRoot::new(
            path.join(GLOBAL_DIR),
        ))));
        Ok(Self {
            connection_id,
            path,
            global,
            projects: Mutex::new(HashMap::new()),
        })
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn global(&self) -> &Arc<GlobalStores> {
        &self.global
    }

    /// Stores of `project_key`, created on first use and shared afterwards.
    pub fn project(&self, project_key: &str) -> Result<Arc<ProjectStores>> {
        require_key("project key", project_key)?;
        let mut projects = self.projects.lock();
        let stores = projects
            .entry(project_key.to_string())
            .or_insert_with(|| {
                let path = self
                    .path
                    .join(PROJECTS_DIR)
                    .join(encode_for_fs(project_key));
                Arc::new(ProjectStores::new(Arc::new(StorageRoot::new(path))))
            })
            .clone();
        Ok(stores)
    }

    /// Remove everything stored for this connection.
    ///
    /// Runs with the global root and every open project root held
    /// exclusively, global first and projects by key, so in-flight actions
    /// finish first and none starts until the tree is gone. Projects cannot be
    /// opened meanwhile.
    pub fn delete(&self) -> Result<()> {
        let projects = self.projects.lock();
        let mut open: Vec<_> = projects.iter().collect();
        open.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut roots = vec![&*self.global.root];
        roots.extend(open.iter().map(|(_, stores)| &*stores.root));
        with_exclusive(&roots, || remove_dir_if_exists(&self.path))?;
        drop(projects);

        tracing::debug!(
            target: "tether.storage",
            connection = %self.connection_id,
            path = %self.path.display(),
            "deleted connection storage"
        );
        Ok(())
    }
}

fn with_exclusive<T>(roots: &[&StorageRoot], action: impl FnOnce() -> T) -> T {
    match roots.split_first() {
        Some((first, rest)) => first.exclusive_action(|_| with_exclusive(rest, action)),
        None => action(),
    }
}
