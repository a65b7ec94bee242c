//! Relative file names of the on-disk layout.
//!
//! ```text
//! <connection>/
//!   global/
//!     storage_status.pb
//!     server_info.pb
//!     properties.pb
//!     plugin_references.pb
//!     rules.pb
//!     quality_profiles.pb
//!     project_list.pb
//!     active_rules/<encoded-quality-profile-key>.pb
//!   projects/<encoded-project-key>/
//!     storage_status.pb
//!     component_list.pb
//!     configuration.pb
//!     server_issues/<encoded-branch>/<h>/<h>/<md5(server path)>.pb
//! ```

/// Version of the layout and record schema written by this crate.
///
/// Compared by exact string equality; any difference makes a storage stale.
pub const STORAGE_VERSION: &str = "4";

pub const GLOBAL_DIR: &str = "global";
pub const PROJECTS_DIR: &str = "projects";

pub const STORAGE_STATUS_PB: &str = "storage_status.pb";
pub const SERVER_INFO_PB: &str = "server_info.pb";
pub const PROPERTIES_PB: &str = "properties.pb";
pub const PLUGIN_REFERENCES_PB: &str = "plugin_references.pb";
pub const RULES_PB: &str = "rules.pb";
pub const QUALITY_PROFILES_PB: &str = "quality_profiles.pb";
pub const PROJECT_LIST_PB: &str = "project_list.pb";
pub const ACTIVE_RULES_DIR: &str = "active_rules";

pub const COMPONENT_LIST_PB: &str = "component_list.pb";
pub const CONFIGURATION_PB: &str = "configuration.pb";
pub const SERVER_ISSUES_DIR: &str = "server_issues";

/// Directory levels used to spread per-file issue records.
pub const SERVER_ISSUES_LEVELS: usize = 2;
