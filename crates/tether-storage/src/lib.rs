//! Local mirror of server-side analysis data.
//!
//! Each server connection owns one directory tree, split into a `global/`
//! tree and one tree per project. Records are protobuf files written by
//! typed stores; a synchronization builds a fresh tree in a staging directory
//! and swaps it in with [`StorageRoot::replace_storage_with`], so readers see
//! either the old data or the new data, never a mix.
//!
//! Locking is two-level:
//! - every typed store serializes access to its own record with its own guard;
//! - every [`StorageRoot`] is held shared by all individual reads and writes,
//!   and exclusively only while its tree is swapped or deleted.
//!
//! Data written by a different [`STORAGE_VERSION`] is reported as stale by
//! [`StorageStatusReader`] and must not be read further.

mod codec;
mod config;
mod connection;
mod error;
mod guard;
mod key;
mod layout;
mod object_store;
pub mod proto;
mod status;
mod storage_root;
pub mod stores;
mod util;

pub use codec::{
    decode_delimited, decode_message, encode_delimited, encode_message, read_delimited,
    read_message, write_delimited, write_message,
};
pub use config::{StorageConfig, STORAGE_DIR_ENV};
pub use connection::ConnectionStorage;
pub use error::{Result, StorageError};
pub use guard::RwGuard;
pub use key::{encode_for_fs, MAX_ENCODED_KEY_LEN};
pub use layout::*;
pub use object_store::{
    EncodedKeyMapper, FixedPath, HashingPathMapper, ObjectStore, PathMapper, Reader, Writer,
};
pub use status::{StaleStatus, StorageState, StorageStatusReader, SyncStatus};
pub use storage_root::StorageRoot;
pub use stores::{GlobalStores, ProjectStores};
pub use util::{atomic_write, now_millis};
