//! Per-file server issues, one set per branch.
//!
//! Issues are grouped by the server-relative path of the file they belong to;
//! each file's issues are one delimited sequence under
//! `server_issues/<encoded branch>/`, at a location derived from the MD5 of
//! that path. A file with no record simply has no issues.

use crate::codec::{decode_delimited, encode_delimited};
use crate::error::Result;
use crate::guard::RwGuard;
use crate::key::{encode_for_fs, require_key};
use crate::layout::{SERVER_ISSUES_DIR, SERVER_ISSUES_LEVELS};
use crate::object_store::{HashingPathMapper, ObjectStore};
use crate::proto::ServerIssue;
use crate::storage_root::{remove_dir_if_exists, StorageRoot};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_paths::{to_slash, PrefixPair};

type IssueObjects = ObjectStore<str, Vec<ServerIssue>, HashingPathMapper>;

#[derive(Debug)]
pub struct ServerIssueStore {
    root: Arc<StorageRoot>,
    guard: RwGuard,
}

impl ServerIssueStore {
    pub fn new(root: Arc<StorageRoot>) -> Self {
        Self {
            root,
            guard: RwGuard::new(),
        }
    }

    /// Directory holding every issue record of `branch`.
    pub fn branch_dir(&self, branch: &str) -> Result<PathBuf> {
        require_key("branch", branch)?;
        Ok(self
            .root
            .path()
            .join(SERVER_ISSUES_DIR)
            .join(encode_for_fs(branch)))
    }

    pub fn path_for(&self, branch: &str, server_path: &str) -> Result<PathBuf> {
        Ok(self.objects(branch)?.path_for(server_path))
    }

    /// Write `issues` of `branch` grouped by `primary_path`.
    ///
    /// Each file mentioned in the batch has its previous issues replaced;
    /// files not mentioned are left untouched.
    pub fn save(&self, branch: &str, issues: &[ServerIssue]) -> Result<()> {
        let objects = self.objects(branch)?;
        let by_file = group_by_file(issues);
        self.guard
            .write(|| self.root.write_action(|_| write_all(&objects, &by_file)))?;
        tracing::debug!(
            target: "tether.storage",
            branch,
            files = by_file.len(),
            issues = issues.len(),
            "stored server issues"
        );
        Ok(())
    }

    /// Replace every issue of `branch`: files missing from the batch end up
    /// with no issues.
    pub fn replace_all(&self, branch: &str, issues: &[ServerIssue]) -> Result<()> {
        let objects = self.objects(branch)?;
        let branch_dir = self.branch_dir(branch)?;
        let by_file = group_by_file(issues);
        self.guard.write(|| {
            self.root.write_action(|_| -> Result<()> {
                remove_dir_if_exists(&branch_dir)?;
                write_all(&objects, &by_file)
            })
        })?;
        tracing::debug!(
            target: "tether.storage",
            branch,
            files = by_file.len(),
            issues = issues.len(),
            "replaced all server issues of branch"
        );
        Ok(())
    }

    /// Replace the issues of one file. An empty slice removes the record.
    pub fn save_file(
        &self,
        branch: &str,
        server_path: &str,
        issues: &[ServerIssue],
    ) -> Result<()> {
        if issues.is_empty() {
            return self.delete(branch, server_path);
        }
        let objects = self.objects(branch)?;
        let issues = issues.to_vec();
        self.guard
            .write(|| self.root.write_action(|_| objects.write(server_path, &issues)))
    }

    pub fn load(&self, branch: &str, server_path: &str) -> Result<Vec<ServerIssue>> {
        let objects = self.objects(branch)?;
        let found = self
            .guard
            .read(|| self.root.read_action(|_| objects.read(server_path)))?;
        Ok(found.unwrap_or_default())
    }

    pub fn delete(&self, branch: &str, server_path: &str) -> Result<()> {
        let objects = self.objects(branch)?;
        self.guard
            .write(|| self.root.write_action(|_| objects.delete(server_path)))
    }

    fn objects(&self, branch: &str) -> Result<IssueObjects> {
        let mapper = HashingPathMapper::new(self.branch_dir(branch)?, SERVER_ISSUES_LEVELS);
        Ok(ObjectStore::new(
            mapper,
            decode_delimited::<ServerIssue>,
            encode_issues,
        ))
    }
}

fn group_by_file(issues: &[ServerIssue]) -> BTreeMap<&str, Vec<ServerIssue>> {
    let mut by_file: BTreeMap<&str, Vec<ServerIssue>> = BTreeMap::new();
    for issue in issues {
        by_file
            .entry(issue.primary_path.as_str())
            .or_default()
            .push(issue.clone());
    }
    by_file
}

fn write_all(objects: &IssueObjects, by_file: &BTreeMap<&str, Vec<ServerIssue>>) -> Result<()> {
    for (server_path, file_issues) in by_file {
        objects.write(server_path, file_issues)?;
    }
    Ok(())
}

#[allow(clippy::ptr_arg)]
fn encode_issues(issues: &Vec<ServerIssue>) -> Vec<u8> {
    encode_delimited(issues)
}

/// Looks up server issues for IDE files through a path binding.
#[derive(Clone, Debug)]
pub struct IssueStoreReader {
    store: Arc<ServerIssueStore>,
}

impl IssueStoreReader {
    pub fn new(store: Arc<ServerIssueStore>) -> Self {
        Self { store }
    }

    /// Issues on `branch` of the server file bound to `ide_path`, with
    /// `primary_path` rewritten into the IDE path space.
    ///
    /// A path outside the binding's IDE prefix has no server counterpart and
    /// therefore no issues.
    pub fn load_for_ide_path(
        &self,
        branch: &str,
        binding: &PrefixPair,
        ide_path: &Path,
    ) -> Result<Vec<ServerIssue>> {
        let Some(server_path) = binding.to_server_path(ide_path) else {
            tracing::debug!(
                target: "tether.storage",
                path = %ide_path.display(),
                "file is outside of the bound ide prefix"
            );
            return Ok(Vec::new());
        };

        let mut issues = self.store.load(branch, &to_slash(&server_path))?;
        for issue in &mut issues {
            if let Some(local) = binding.to_ide_path(Path::new(&issue.primary_path)) {
                issue.primary_path = to_slash(&local);
            }
        }
        Ok(issues)
    }
}
