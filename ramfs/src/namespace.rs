//! The operations that mutate the namespace graph.
//!
//! Everything here funnels through two internal primitives: `attach`, which
//! binds an existing node under a directory and accounts for the new link,
//! and `detach_file`, which drops a name and destroys the node once nothing
//! references it. Directory removal and rename rewire entries by hand since
//! their accounting differs.

use ramfs_api::error::{FsError, Result};
use ramfs_api::fs::{DirectorySupport, NamespaceSupport, PathSupport};
use ramfs_api::types::{valid_name, FileAttr, NodeId};

use crate::fs::RamFs;
use crate::listing::{DOT, DOTDOT};
use crate::node::Inode;

impl RamFs {
    /// Attach the existing node `node` under `dir` as `name`.
    ///
    /// Bumps the node's link count for the new entry; the first attach also
    /// records `dir` as the node's canonical parent. Later attaches (hard
    /// links) leave the parent alone.
    pub(crate) fn attach(&mut self, dir: NodeId, name: &str, node: NodeId) -> Result<()> {
        if self.nodes.node(dir)?.listing()?.lookup(name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        self.nodes.node_mut(dir)?.listing_mut()?.append(name, node)?;
        let inode = self.nodes.node_mut(node)?;
        inode.nlink += 1;
        if inode.parent.is_none() {
            inode.parent = Some(dir);
        }
        Ok(())
    }

    /// Drop the entry `name` of `dir` together with the link it carried.
    /// Destroys the target once both its counters are zero; with handles
    /// still open it lives on as an orphan until the last release.
    pub(crate) fn detach_file(&mut self, dir: NodeId, name: &str) -> Result<()> {
        let target = self.nodes.node_mut(dir)?.listing_mut()?.remove(name)?;
        let inode = self.nodes.node_mut(target)?;
        inode.nlink -= 1;
        if inode.nlink == 0 && inode.nopen == 0 {
            self.nodes.remove(target);
        }
        Ok(())
    }

    /// Shared front half of mknod and mkdir: locate the parent, validate the
    /// name, refuse occupied names.
    fn create_slot<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str)> {
        let (dir, name) = self.resolve_parent(path)?;
        if !valid_name(name) {
            return Err(FsError::InvalidPath);
        }
        if self.nodes.node(dir)?.listing()?.lookup(name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        Ok((dir, name))
    }
}

/// True when any `/`-separated segment of `path` is exactly `.` or `..`.
/// Names merely containing dots are allowed.
fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|seg| seg == DOT || seg == DOTDOT)
}

/// String-prefix descendant check with a `/` boundary: `/a/b` descends from
/// `/a`, `/ab` does not.
fn is_descendant(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

impl NamespaceSupport for RamFs {
    fn getattr(&self, path: &str) -> Result<FileAttr> {
        let node = self.nodes.node(self.resolve_path(path)?)?;
        Ok(FileAttr {
            mode: node.mode,
            uid: node.uid,
            gid: node.gid,
            nlink: node.nlink,
            size: node.size(),
        })
    }

    fn mknod(&mut self, path: &str, mode: u32, uid: u32, gid: u32) -> Result<NodeId> {
        let (dir, name) = self.create_slot(path)?;
        let id = self
            .nodes
            .allocate_with(|_| Ok(Inode::new_regular(mode, uid, gid)))?;
        self.attach(dir, name, id)?;
        Ok(id)
    }

    fn mkdir(&mut self, path: &str, mode: u32, uid: u32, gid: u32) -> Result<NodeId> {
        let (dir, name) = self.create_slot(path)?;
        let id = self
            .nodes
            .allocate_with(|id| Inode::new_directory(mode, uid, gid, id, dir))?;
        self.attach(dir, name, id)?;
        // the child's `..` back-references the parent
        self.nodes.node_mut(dir)?.nlink += 1;
        Ok(id)
    }

    fn link(&mut self, existing: &str, new: &str) -> Result<NodeId> {
        let src = self.resolve_path(existing)?;
        if self.nodes.node(src)?.is_dir() {
            return Err(FsError::NotPermitted);
        }
        let (dir, name) = self.resolve_parent(new)?;
        if !valid_name(name) {
            return Err(FsError::InvalidPath);
        }
        self.attach(dir, name, src)?;
        Ok(src)
    }

    fn unlink(&mut self, path: &str) -> Result<()> {
        let (dir, name) = self.resolve_parent(path)?;
        let target = self.dir_lookup(dir, name)?;
        if self.nodes.node(target)?.is_dir() {
            return Err(FsError::IsADirectory);
        }
        self.detach_file(dir, name)
    }

    fn rmdir(&mut self, path: &str) -> Result<()> {
        let target = self.resolve_path(path)?;
        if target == self.root {
            return Err(FsError::Busy);
        }
        if !self.nodes.node(target)?.is_dir() {
            return Err(FsError::NotADirectory);
        }
        if !self.dir_is_empty(target)? {
            return Err(FsError::NotEmpty);
        }
        let (dir, name) = self.resolve_parent(path)?;
        // a path ending in a dot entry would remove `.` or `..` from the
        // target itself and strand the real entry
        if name == DOT || name == DOTDOT {
            return Err(FsError::InvalidPath);
        }
        self.nodes.node_mut(dir)?.listing_mut()?.remove(name)?;
        // the child's `..` back-reference dies with it
        self.nodes.node_mut(dir)?.nlink -= 1;
        self.nodes.remove(target);
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if has_dot_segment(old) || has_dot_segment(new) {
            return Err(FsError::InvalidPath);
        }
        if is_descendant(new, old) {
            return Err(FsError::InvalidPath);
        }
        let (old_dir, old_name) = self.resolve_parent(old)?;
        let moved = self.dir_lookup(old_dir, old_name)?;
        let (new_dir, new_name) = self.resolve_parent(new)?;
        if !valid_name(new_name) {
            return Err(FsError::InvalidPath);
        }
        if old_dir == new_dir && old_name == new_name {
            return Ok(());
        }
        if let Some(existing) = self.nodes.node(new_dir)?.listing()?.lookup(new_name) {
            if self.nodes.node(existing)?.is_dir() {
                return Err(FsError::IsADirectory);
            }
            self.detach_file(new_dir, new_name)?;
        }
        let moved = {
            let removed = self.nodes.node_mut(old_dir)?.listing_mut()?.remove(old_name)?;
            debug_assert_eq!(removed, moved);
            removed
        };
        self.nodes
            .node_mut(new_dir)?
            .listing_mut()?
            .append(new_name, moved)?;
        // link count conserved; the canonical parent stays with the first
        // directory that attached the node
        Ok(())
    }

    fn truncate(&mut self, path: &str, size: u64) -> Result<()> {
        let target = self.resolve_path(path)?;
        let data = self.nodes.node_mut(target)?.bytes_mut()?;
        let size = size as usize;
        if size == 0 {
            // release the buffer outright instead of keeping dead capacity
            *data = Vec::new();
        } else if size <= data.len() {
            data.truncate(size);
        } else {
            data.try_reserve(size - data.len())?;
            data.resize(size, 0);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/namespace_test.rs"]
mod tests;
