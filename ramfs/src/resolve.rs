//! Walking slash-separated paths through the node graph.
//!
//! Resolution is pure lookup: it splits the path into segments and chases
//! each one through the current directory's listing. `.` and `..` need no
//! special handling because every listing carries them as ordinary entries.

use ramfs_api::error::{FsError, Result};
use ramfs_api::fs::{DirectorySupport, PathSupport};
use ramfs_api::types::{valid_name, NodeId};

use crate::fs::RamFs;

impl RamFs {
    /// Walk `path` starting from `start` and return the node it names.
    ///
    /// An empty remainder names the current node, which makes a trailing
    /// slash harmless. Each lookup is a byte-wise match on the whole
    /// segment: both the length and the content must agree, so an entry
    /// whose name is a prefix of the segment does not match.
    pub(crate) fn resolve_from(&self, start: NodeId, path: &str) -> Result<NodeId> {
        let mut cur = start;
        let mut rest = path.strip_prefix('/').unwrap_or(path);
        loop {
            if rest.is_empty() {
                return Ok(cur);
            }
            let listing = self.nodes.node(cur)?.listing()?;
            let (segment, tail) = match rest.find('/') {
                Some(pos) => (&rest[..pos], &rest[pos + 1..]),
                None => (rest, ""),
            };
            cur = listing.lookup(segment).ok_or(FsError::NoEntry)?;
            rest = tail;
        }
    }
}

impl DirectorySupport for RamFs {
    fn dir_lookup(&self, dir: NodeId, name: &str) -> Result<NodeId> {
        self.nodes
            .node(dir)?
            .listing()?
            .lookup(name)
            .ok_or(FsError::NoEntry)
    }

    fn dir_is_empty(&self, dir: NodeId) -> Result<bool> {
        Ok(self.nodes.node(dir)?.listing()?.is_empty())
    }
}

impl PathSupport for RamFs {
    fn valid_name(name: &str) -> bool {
        valid_name(name)
    }

    fn resolve_path(&self, path: &str) -> Result<NodeId> {
        self.resolve_from(self.root, path)
    }

    fn resolve_parent<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str)> {
        if path.is_empty() {
            return Err(FsError::NoEntry);
        }
        let rest = path.strip_prefix('/').ok_or(FsError::InvalidPath)?;
        let (prefix, name) = match rest.rfind('/') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => ("", rest),
        };
        if name.is_empty() {
            return Err(FsError::NoEntry);
        }
        let parent = self.resolve_from(self.root, prefix)?;
        if !self.nodes.node(parent)?.is_dir() {
            return Err(FsError::NotADirectory);
        }
        Ok((parent, name))
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/resolve_test.rs"]
mod tests;
