//! Connection-wide records. A missing file means the connection was never
//! synchronized and surfaces as [`StorageError::MissingStorage`].
//!
//! [`StorageError::MissingStorage`]: crate::StorageError::MissingStorage

use super::record::RecordStore;
use crate::error::Result;
use crate::layout::{
    PLUGIN_REFERENCES_PB, PROJECT_LIST_PB, PROPERTIES_PB, QUALITY_PROFILES_PB, SERVER_INFO_PB,
};
use crate::proto::{
    GlobalProperties, PluginReference, PluginReferences, Project, ProjectList, QProfile,
    QProfiles, ServerInfos,
};
use crate::storage_root::StorageRoot;
use std::sync::Arc;

#[derive(Debug)]
pub struct QualityProfilesStore {
    record: RecordStore<QProfiles>,
}

impl QualityProfilesStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, QUALITY_PROFILES_PB),
        }
    }

    pub fn store(&self, qprofiles: &QProfiles) -> Result<()> {
        self.record.store(qprofiles)
    }

    pub fn get_all(&self) -> Result<QProfiles> {
        self.record.read_required()
    }

    pub fn get(&self, qprofile_key: &str) -> Result<Option<QProfile>> {
        Ok(self.get_all()?.qprofiles_by_key.remove(qprofile_key))
    }

    /// Key of the default profile for `language`, if the server declares one.
    pub fn default_for_language(&self, language: &str) -> Result<Option<String>> {
        Ok(self
            .get_all()?
            .default_qprofiles_by_language
            .remove(language))
    }
}

#[derive(Debug)]
pub struct ProjectsStore {
    record: RecordStore<ProjectList>,
}

impl ProjectsStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, PROJECT_LIST_PB),
        }
    }

    pub fn store(&self, projects: &ProjectList) -> Result<()> {
        self.record.store(projects)
    }

    pub fn get_all(&self) -> Result<ProjectList> {
        self.record.read_required()
    }

    pub fn get(&self, project_key: &str) -> Result<Option<Project>> {
        Ok(self.get_all()?.projects_by_key.remove(project_key))
    }
}

#[derive(Debug)]
pub struct GlobalPropertiesStore {
    record: RecordStore<GlobalProperties>,
}

impl GlobalPropertiesStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, PROPERTIES_PB),
        }
    }

    pub fn store(&self, properties: &GlobalProperties) -> Result<()> {
        self.record.store(properties)
    }

    pub fn get_all(&self) -> Result<GlobalProperties> {
        self.record.read_required()
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_all()?.properties.remove(key))
    }
}

#[derive(Debug)]
pub struct PluginReferencesStore {
    record: RecordStore<PluginReferences>,
}

impl PluginReferencesStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, PLUGIN_REFERENCES_PB),
        }
    }

    pub fn store(&self, references: &PluginReferences) -> Result<()> {
        self.record.store(references)
    }

    pub fn get_all(&self) -> Result<PluginReferences> {
        self.record.read_required()
    }

    pub fn get(&self, plugin_key: &str) -> Result<Option<PluginReference>> {
        Ok(self
            .get_all()?
            .reference
            .into_iter()
            .find(|reference| reference.key == plugin_key))
    }
}

#[derive(Debug)]
pub struct ServerInfoStore {
    record: RecordStore<ServerInfos>,
}

impl ServerInfoStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, SERVER_INFO_PB),
        }
    }

    pub fn store(&self, infos: &ServerInfos) -> Result<()> {
        self.record.store(infos)
    }

    pub fn get(&self) -> Result<ServerInfos> {
        self.record.read_required()
    }
}
