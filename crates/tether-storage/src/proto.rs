//! Protobuf records persisted under a storage root.
//!
//! Field numbers are part of the on-disk format: never renumber or reuse a
//! tag, bump [`crate::STORAGE_VERSION`] instead.

use std::collections::BTreeMap;

#[derive(Clone, PartialEq, prost::Message)]
pub struct StorageStatus {
    #[prost(string, tag = "1")]
    pub storage_version: String,
    #[prost(string, tag = "2")]
    pub client_version: String,
    /// Epoch millis of the last completed synchronization.
    #[prost(int64, tag = "3")]
    pub update_timestamp: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ServerInfos {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub version: String,
    #[prost(string, tag = "3")]
    pub status: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GlobalProperties {
    #[prost(btree_map = "string, string", tag = "1")]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PluginReferences {
    #[prost(message, repeated, tag = "1")]
    pub reference: Vec<PluginReference>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PluginReference {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub hash: String,
    #[prost(string, tag = "3")]
    pub filename: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Rules {
    #[prost(btree_map = "string, message", tag = "1")]
    pub rules_by_key: BTreeMap<String, Rule>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Rule {
    #[prost(string, tag = "1")]
    pub repo: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub severity: String,
    #[prost(string, tag = "5")]
    pub lang: String,
    #[prost(string, tag = "6")]
    pub internal_key: String,
    #[prost(string, tag = "7")]
    pub html_desc: String,
    #[prost(bool, tag = "8")]
    pub is_template: bool,
    #[prost(string, tag = "9")]
    pub template_key: String,
    #[prost(string, tag = "10")]
    pub r#type: String,
}

/// Rules activated in one quality profile, keyed by `repo:key`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ActiveRules {
    #[prost(btree_map = "string, message", tag = "1")]
    pub active_rules_by_key: BTreeMap<String, ActiveRule>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ActiveRule {
    #[prost(string, tag = "1")]
    pub repo: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(string, tag = "3")]
    pub severity: String,
    #[prost(btree_map = "string, string", tag = "4")]
    pub params: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QProfiles {
    #[prost(btree_map = "string, message", tag = "1")]
    pub qprofiles_by_key: BTreeMap<String, QProfile>,
    #[prost(btree_map = "string, string", tag = "2")]
    pub default_qprofiles_by_language: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QProfile {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub language: String,
    #[prost(string, tag = "4")]
    pub language_name: String,
    #[prost(int64, tag = "5")]
    pub active_rule_count: i64,
    #[prost(int64, tag = "6")]
    pub rules_updated_at: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProjectList {
    #[prost(btree_map = "string, message", tag = "1")]
    pub projects_by_key: BTreeMap<String, Project>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Project {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProjectConfiguration {
    #[prost(btree_map = "string, string", tag = "1")]
    pub properties: BTreeMap<String, String>,
    #[prost(btree_map = "string, string", tag = "2")]
    pub qprofile_per_language: BTreeMap<String, String>,
    #[prost(btree_map = "string, string", tag = "3")]
    pub module_path_by_key: BTreeMap<String, String>,
}

/// Server-relative paths of the files seen by the last remote scan.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ProjectComponents {
    #[prost(string, repeated, tag = "1")]
    pub component: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ServerIssue {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub rule_key: String,
    #[prost(int32, tag = "3")]
    pub line: i32,
    #[prost(string, tag = "4")]
    pub message: String,
    #[prost(string, tag = "5")]
    pub checksum: String,
    #[prost(string, tag = "6")]
    pub assignee_login: String,
    /// Server-relative path of the file the issue belongs to.
    #[prost(string, tag = "7")]
    pub primary_path: String,
    #[prost(string, tag = "8")]
    pub severity: String,
    #[prost(string, tag = "9")]
    pub r#type: String,
    #[prost(int64, tag = "10")]
    pub creation_date: i64,
    #[prost(string, tag = "11")]
    pub resolution: String,
}
