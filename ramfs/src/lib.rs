//! Memory-resident POSIX-style filesystem core
//!
//! A hierarchical namespace of directories and regular files whose contents
//! live entirely in process memory and disappear with the [`RamFs`] value.
//! The host bridge drives it through the traits of [`ramfs_api::fs`]; this
//! crate supplies the node arena, the path resolver, the namespace
//! operations, handle-based content access and the teardown walk.
//!
//! The graph is an arena of inodes addressed by stable integer identifiers.
//! Directory listings store identifiers, never ownership, so the reference
//! cycles every directory forms through `.` and `..` cost nothing: dropping
//! the arena drops the graph.

#![deny(missing_docs)]

pub mod fs;

mod file;
mod listing;
mod namespace;
mod node;
mod resolve;
mod teardown;

pub use crate::fs::RamFs;
