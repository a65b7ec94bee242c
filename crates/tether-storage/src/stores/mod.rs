//! Typed stores: one per record kind, each with its own guard, all sharing
//! the [`StorageRoot`] of the tree they live in.

mod global;
mod issues;
mod project;
mod record;
mod rules;
mod status;

pub use global::{
    GlobalPropertiesStore, PluginReferencesStore, ProjectsStore, QualityProfilesStore,
    ServerInfoStore,
};
pub use issues::{IssueStoreReader, ServerIssueStore};
pub use project::{ComponentsStore, ProjectConfigurationStore};
pub use record::RecordStore;
pub use rules::{ActiveRulesStore, RulesStore};
pub use status::{current_status, StorageStatusStore};

use crate::error::Result;
use crate::status::StorageStatusReader;
use crate::storage_root::StorageRoot;
use std::path::Path;
use std::sync::Arc;
use tether_paths::{match_prefixes, PrefixPair};

/// Every store of a connection's `global/` tree.
#[derive(Debug)]
pub struct GlobalStores {
    pub root: Arc<StorageRoot>,
    pub status: StorageStatusStore,
    pub server_info: ServerInfoStore,
    pub properties: GlobalPropertiesStore,
    pub plugin_references: PluginReferencesStore,
    pub rules: RulesStore,
    pub quality_profiles: QualityProfilesStore,
    pub active_rules: ActiveRulesStore,
    pub projects: ProjectsStore,
}

impl GlobalStores {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            status: StorageStatusStore::new(root.clone()),
            server_info: ServerInfoStore::new(root.clone()),
            properties: GlobalPropertiesStore::new(root.clone()),
            plugin_references: PluginReferencesStore::new(root.clone()),
            rules: RulesStore::new(root.clone()),
            quality_profiles: QualityProfilesStore::new(root.clone()),
            active_rules: ActiveRulesStore::new(root.clone()),
            projects: ProjectsStore::new(root.clone()),
            root,
        }
    }

    pub fn status_reader(&self) -> StorageStatusReader<'_> {
        StorageStatusReader::new(&self.status, Some(&self.server_info))
    }
}

/// Every store of one project's tree.
#[derive(Debug)]
pub struct ProjectStores {
    pub root: Arc<StorageRoot>,
    pub status: StorageStatusStore,
    pub components: ComponentsStore,
    pub configuration: ProjectConfigurationStore,
    pub issues: Arc<ServerIssueStore>,
}

impl ProjectStores {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            status: StorageStatusStore::new(root.clone()),
            components: ComponentsStore::new(root.clone()),
            configuration: ProjectConfigurationStore::new(root.clone()),
            issues: Arc::new(ServerIssueStore::new(root.clone())),
            root,
        }
    }

    pub fn status_reader(&self) -> StorageStatusReader<'_> {
        StorageStatusReader::new(&self.status, None)
    }

    pub fn issue_reader(&self) -> IssueStoreReader {
        IssueStoreReader::new(self.issues.clone())
    }

    /// Reconcile the local files with the components of the last remote scan.
    pub fn compute_binding<I, P>(&self, ide_paths: I) -> Result<PrefixPair>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let components = self.components.get()?;
        Ok(match_prefixes(
            components.component.iter().map(Path::new),
            ide_paths,
        ))
    }
}
