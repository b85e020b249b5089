//! Ordered directory listings.

use ramfs_api::error::{FsError, Result};
use ramfs_api::types::{DirEntry, NodeId};

/// Name of the self entry every directory starts with.
pub(crate) const DOT: &str = ".";
/// Name of the parent entry every directory starts with.
pub(crate) const DOTDOT: &str = "..";

/// The ordered sequence of named entries belonging to one directory.
///
/// Entries 0 and 1 are always `.` (self) and `..` (parent); the remainder is
/// user entries in insertion order. Names are unique within one listing, a
/// precondition the namespace operations enforce before calling
/// [`Listing::append`].
#[derive(Debug)]
pub(crate) struct Listing {
    entries: Vec<DirEntry>,
}

impl Listing {
    /// Fresh listing for the directory `own` whose parent is `parent`. For
    /// the root both ids are the root itself.
    pub fn new(own: NodeId, parent: NodeId) -> Result<Listing> {
        let mut entries = Vec::new();
        entries.try_reserve(2)?;
        entries.push(DirEntry {
            node: own,
            name: DOT.to_string(),
        });
        entries.push(DirEntry {
            node: parent,
            name: DOTDOT.to_string(),
        });
        Ok(Listing { entries })
    }

    /// Append a fresh entry at the tail. The caller has already checked
    /// that `name` is unused in this listing.
    pub fn append(&mut self, name: &str, node: NodeId) -> Result<()> {
        let entry = DirEntry::new(node, name).ok_or(FsError::InvalidPath)?;
        self.entries.try_reserve(1)?;
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the first entry named `name` and return the node it
    /// referenced. Link counts are untouched.
    pub fn remove(&mut self, name: &str) -> Result<NodeId> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or(FsError::NoEntry)?;
        Ok(self.entries.remove(pos).node)
    }

    /// Node the entry `name` refers to, if present. The match is byte-wise
    /// on the full name, so a stored name that is a prefix of `name` does
    /// not match.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.node)
    }

    /// True iff only `.` and `..` remain.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 2
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Consume the listing into its entries, for the teardown walk.
    pub fn into_entries(self) -> Vec<DirEntry> {
        self.entries
    }
}
