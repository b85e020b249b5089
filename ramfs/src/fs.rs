//! The filesystem container handed between the bridge and the core.

use ramfs_api::error::{FsError, Result};
use ramfs_api::fs::FileSysSupport;
use ramfs_api::types::NodeId;

use crate::node::{Inode, NodeTable};
use crate::teardown;

/// A memory-resident filesystem: the node arena and the root it hangs from.
///
/// The value is the sole owner of the graph. The bridge carries it through
/// its context slot explicitly; there is no process-wide instance. Requests
/// arrive one at a time, so none of the methods lock anything; a bridge
/// running threaded can wrap the whole value in one coarse mutex.
#[derive(Debug)]
pub struct RamFs {
    pub(crate) nodes: NodeTable,
    pub(crate) root: NodeId,
}

impl RamFs {
    /// Number of live nodes, orphans included. Intended for diagnostics and
    /// tests.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl FileSysSupport for RamFs {
    type Error = FsError;

    fn init() -> Result<RamFs> {
        let mut nodes = NodeTable::new();
        let root = nodes.allocate_with(|id| {
            let mut node = Inode::new_directory(0o777, 0, 0, id, id)?;
            // self-reference in lieu of an entry in a parent; `.` is already
            // counted by the constructor
            node.nlink += 1;
            node.parent = Some(id);
            Ok(node)
        })?;
        Ok(RamFs { nodes, root })
    }

    fn destroy(self) {
        teardown::teardown(self)
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/dir_test.rs"]
mod tests;
