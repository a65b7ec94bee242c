//! Reconciliation of local (IDE) and remote (server scan) file layouts.
//!
//! A working copy and the last server-side scan of the same project often
//! disagree on where the project root is: the IDE may have opened a parent
//! folder, or the scanner may have been run from a module directory. This
//! crate infers, from a sample of relative paths on each side, the single
//! [`PrefixPair`] that best explains the difference, and translates paths
//! between the two spaces once a pair has been chosen.
//!
//! Everything here is pure: no I/O, no shared state. Each call to
//! [`match_prefixes`] builds its own scratch structures, so concurrent callers
//! never contend.

mod matcher;
mod prefix;
mod segments;
mod tree;

pub use matcher::match_prefixes;
pub use prefix::PrefixPair;
pub use segments::{join_segments, path_segments, to_slash};
