//! Content and listing access through open handles.
//!
//! A handle pins its inode by holding the open count above zero. That count
//! is what carries an unlinked-but-open file through its orphan state: the
//! namespace no longer reaches it, the handles still do, and the last
//! release destroys it.

use std::convert::TryFrom;

use ramfs_api::error::{FsError, Result};
use ramfs_api::fs::{DirStreamSupport, FileRWSupport, PathSupport};
use ramfs_api::types::{DirEntry, DirHandle, FileHandle, NodeId};

use crate::fs::RamFs;
use crate::node::Inode;

impl RamFs {
    /// Handle-side access: a vacated slot or a zero open count both mean the
    /// bridge is using a handle it no longer holds.
    fn handle_node(&self, id: NodeId) -> Result<&Inode> {
        let node = self.nodes.get(id).ok_or(FsError::BadHandle)?;
        if node.nopen == 0 {
            return Err(FsError::BadHandle);
        }
        Ok(node)
    }

    fn handle_node_mut(&mut self, id: NodeId) -> Result<&mut Inode> {
        let node = self.nodes.get_mut(id).ok_or(FsError::BadHandle)?;
        if node.nopen == 0 {
            return Err(FsError::BadHandle);
        }
        Ok(node)
    }
}

impl FileRWSupport for RamFs {
    fn open(&mut self, path: &str) -> Result<FileHandle> {
        let id = self.resolve_path(path)?;
        let node = self.nodes.node_mut(id)?;
        if node.is_dir() {
            return Err(FsError::IsADirectory);
        }
        node.nopen += 1;
        Ok(FileHandle { node: id })
    }

    fn read(&self, fh: FileHandle, offset: u64, size: u64) -> Result<&[u8]> {
        let data = self.handle_node(fh.node)?.bytes()?;
        let len = data.len() as u64;
        if offset >= len {
            return Ok(&[]);
        }
        let end = len.min(offset.saturating_add(size));
        Ok(&data[offset as usize..end as usize])
    }

    fn write(&mut self, fh: FileHandle, data: &[u8], offset: u64) -> Result<u64> {
        let buf = self.handle_node_mut(fh.node)?.bytes_mut()?;
        // end-of-write arithmetic stays in the u64 domain; an end the file
        // can never reach is out-of-space
        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(FsError::OutOfSpace)?;
        let end = usize::try_from(end).map_err(|_| FsError::OutOfSpace)?;
        let offset = offset as usize;
        if end > buf.len() {
            buf.try_reserve(end - buf.len())?;
            // a write starting past the current end zero-fills the gap
            buf.resize(end, 0);
        }
        buf[offset..end].copy_from_slice(data);
        Ok(data.len() as u64)
    }

    fn release(&mut self, fh: FileHandle) -> Result<()> {
        let node = self.handle_node_mut(fh.node)?;
        node.nopen -= 1;
        if node.nopen == 0 && node.nlink == 0 {
            // last handle on an orphan
            self.nodes.remove(fh.node);
        }
        Ok(())
    }
}

impl DirStreamSupport for RamFs {
    fn opendir(&mut self, path: &str) -> Result<DirHandle> {
        let id = self.resolve_path(path)?;
        let node = self.nodes.node_mut(id)?;
        if !node.is_dir() {
            return Err(FsError::NotADirectory);
        }
        node.nopen += 1;
        Ok(DirHandle { node: id })
    }

    fn readdir(&self, dh: DirHandle) -> Result<Vec<DirEntry>> {
        Ok(self.handle_node(dh.node)?.listing()?.entries().to_vec())
    }

    fn releasedir(&mut self, dh: DirHandle) -> Result<()> {
        self.handle_node_mut(dh.node)?.nopen -= 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/rw_test.rs"]
mod tests;
