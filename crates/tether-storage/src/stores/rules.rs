//! Rule definitions and per-profile rule activations.
//!
//! Unlike the other stores, both read as empty when their file is missing:
//! a partially synchronized storage can still serve analysis with no rules.

use super::record::RecordStore;
use crate::codec::{decode_message, encode_message};
use crate::error::Result;
use crate::guard::RwGuard;
use crate::layout::{ACTIVE_RULES_DIR, RULES_PB};
use crate::object_store::{EncodedKeyMapper, ObjectStore};
use crate::proto::{ActiveRule, ActiveRules, Rule, Rules};
use crate::storage_root::StorageRoot;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub struct RulesStore {
    record: RecordStore<Rules>,
}

impl RulesStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            record: RecordStore::new(root, RULES_PB),
        }
    }

    pub fn store(&self, rules: &Rules) -> Result<()> {
        self.record.store(rules)
    }

    pub fn get_all(&self) -> Result<Rules> {
        self.record.read_or_default()
    }

    pub fn get(&self, rule_key: &str) -> Result<Option<Rule>> {
        Ok(self.get_all()?.rules_by_key.remove(rule_key))
    }
}

/// One file per quality profile, named after the encoded profile key.
#[derive(Debug)]
pub struct ActiveRulesStore {
    root: Arc<StorageRoot>,
    guard: RwGuard,
    objects: ObjectStore<str, ActiveRules, EncodedKeyMapper>,
}

impl ActiveRulesStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        let mapper = EncodedKeyMapper::new(root.path().join(ACTIVE_RULES_DIR), "pb");
        Self {
            root,
            guard: RwGuard::new(),
            objects: ObjectStore::new(
                mapper,
                decode_message::<ActiveRules>,
                encode_message::<ActiveRules>,
            ),
        }
    }

    pub fn path_for(&self, qprofile_key: &str) -> PathBuf {
        self.objects.path_for(qprofile_key)
    }

    pub fn store(&self, qprofile_key: &str, active_rules: &ActiveRules) -> Result<()> {
        self.guard.write(|| {
            self.root
                .write_action(|_| self.objects.write(qprofile_key, active_rules))?;
            tracing::debug!(
                target: "tether.storage",
                qprofile = qprofile_key,
                count = active_rules.active_rules_by_key.len(),
                "stored active rules"
            );
            Ok(())
        })
    }

    pub fn get_all(&self, qprofile_key: &str) -> Result<ActiveRules> {
        let found = self
            .guard
            .read(|| self.root.read_action(|_| self.objects.read(qprofile_key)))?;
        Ok(found.unwrap_or_default())
    }

    pub fn get(&self, qprofile_key: &str, rule_key: &str) -> Result<Option<ActiveRule>> {
        Ok(self
            .get_all(qprofile_key)?
            .active_rules_by_key
            .remove(rule_key))
    }
}
