//! Recursive destruction of the whole graph.
//!
//! Every directory participates in reference cycles: `.` points at itself
//! and each child's `..` points back at it. The walk stays finite because a
//! node is vacated from the arena *before* its listing is visited, so any
//! re-entry through `.`, `..` or a second hard link finds an empty slot and
//! stops. The arena removal doubles as the visited marker; no per-node flag
//! is needed.

use log::warn;

use ramfs_api::types::NodeId;

use crate::fs::RamFs;
use crate::node::{NodeContent, NodeTable};

/// Destroy every node of `fs`, the tree first, stragglers after.
pub(crate) fn teardown(mut fs: RamFs) {
    let root = fs.root;
    release_tree(&mut fs.nodes, root);
    // whatever is left was unreachable from the root: orphans kept alive by
    // open handles, or nodes stranded by a failed attach
    for (id, node) in fs.nodes.drain() {
        if node.nopen > 0 {
            warn!(
                "teardown: orphan node {} still has {} open handle(s)",
                id, node.nopen
            );
        }
    }
}

fn release_tree(nodes: &mut NodeTable, id: NodeId) {
    let node = match nodes.remove(id) {
        Some(node) => node,
        // already released through another entry
        None => return,
    };
    if node.nopen > 0 {
        warn!(
            "teardown: node {} still has {} open handle(s)",
            id, node.nopen
        );
    }
    if let NodeContent::Directory(listing) = node.content {
        for entry in listing.into_entries() {
            release_tree(nodes, entry.node);
        }
    }
    // a regular file's buffer drops with the node right here
}

#[cfg(test)]
#[path = "../../api/fs-tests/teardown_test.rs"]
mod tests;
