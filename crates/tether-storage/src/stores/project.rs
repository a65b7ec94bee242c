use super::record::RecordStore;
use crate::error::Result;
use crate::layout::{COMPONENT_LIST_PB, CONFIGURATION_PB};
use crate::proto::{ProjectComponents, ProjectConfiguration};
use crate::storage_root::StorageRoot;
use std::sync::Arc;

/// Server-relative paths of the project's files, as seen by the last remote scan.
#[derive(Debug)]
pub struct ComponentsStore {
    record: RecordStore<ProjectComponents>,
}

impl ComponentsStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, COMPONENT_LIST_PB),
        }
    }

    pub fn store(&self, components: &ProjectComponents) -> Result<()> {
        self.record.store(components)
    }

    pub fn get(&self) -> Result<ProjectComponents> {
        self.record.read_required()
    }
}

#[derive(Debug)]
pub struct ProjectConfigurationStore {
    record: RecordStore<ProjectConfiguration>,
}

impl ProjectConfigurationStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, CONFIGURATION_PB),
        }
    }

    pub fn store(&self, configuration: &ProjectConfiguration) -> Result<()> {
        self.record.store(configuration)
    }

    pub fn get(&self) -> Result<ProjectConfiguration> {
        self.record.read_required()
    }
}
