//! The inode arena.
//!
//! Every node of the graph lives in a [`NodeTable`] addressed by
//! [`NodeId`]. Identifiers come from a monotonic counter and are never
//! reused: removal is deallocation, and a handle kept across an unlink can
//! never alias a later node.

use std::collections::HashMap;

use ramfs_api::error::{FsError, Result};
use ramfs_api::types::{FileKind, NodeId, ROOT_ID};

use crate::listing::Listing;

/// Payload of a node: file bytes or a directory listing.
#[derive(Debug)]
pub(crate) enum NodeContent {
    /// Contiguous content buffer of a regular file.
    Regular(Vec<u8>),
    /// Ordered entries of a directory.
    Directory(Listing),
}

/// One node of the tree, either a directory or a regular file.
#[derive(Debug)]
pub(crate) struct Inode {
    /// File-type-and-permission bits. The type component always matches
    /// `content`; the constructors stamp it.
    pub mode: u32,
    /// Owner user identifier.
    pub uid: u32,
    /// Owner group identifier.
    pub gid: u32,
    /// Number of directory entries referring to this node. A directory also
    /// counts its own `.` and each child's `..`.
    pub nlink: u32,
    /// Number of outstanding open handles held by the bridge.
    pub nopen: u32,
    /// The directory that first attached this node. `None` until the first
    /// attach; the root points at itself. Later hard links do not move it.
    pub parent: Option<NodeId>,
    /// File bytes or directory entries.
    pub content: NodeContent,
}

impl Inode {
    /// Fresh regular file with an empty buffer and no links yet.
    pub fn new_regular(mode: u32, uid: u32, gid: u32) -> Inode {
        Inode {
            mode: FileKind::Regular.stamp(mode),
            uid,
            gid,
            nlink: 0,
            nopen: 0,
            parent: None,
            content: NodeContent::Regular(Vec::new()),
        }
    }

    /// Fresh directory `own` under `parent`, its listing seeded with `.` and
    /// `..`. Starts with one link for its own `.`; the entry in the parent
    /// is counted when the node is attached.
    pub fn new_directory(mode: u32, uid: u32, gid: u32, own: NodeId, parent: NodeId) -> Result<Inode> {
        Ok(Inode {
            mode: FileKind::Directory.stamp(mode),
            uid,
            gid,
            nlink: 1,
            nopen: 0,
            parent: None,
            content: NodeContent::Directory(Listing::new(own, parent)?),
        })
    }

    /// File type of this node, derived from the payload.
    pub fn kind(&self) -> FileKind {
        match self.content {
            NodeContent::Regular(_) => FileKind::Regular,
            NodeContent::Directory(_) => FileKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == FileKind::Directory
    }

    /// Byte length of the payload; 0 for directories.
    pub fn size(&self) -> u64 {
        match &self.content {
            NodeContent::Regular(data) => data.len() as u64,
            NodeContent::Directory(_) => 0,
        }
    }

    /// The listing of a directory node.
    pub fn listing(&self) -> Result<&Listing> {
        match &self.content {
            NodeContent::Directory(listing) => Ok(listing),
            NodeContent::Regular(_) => Err(FsError::NotADirectory),
        }
    }

    pub fn listing_mut(&mut self) -> Result<&mut Listing> {
        match &mut self.content {
            NodeContent::Directory(listing) => Ok(listing),
            NodeContent::Regular(_) => Err(FsError::NotADirectory),
        }
    }

    /// The content buffer of a regular-file node.
    pub fn bytes(&self) -> Result<&Vec<u8>> {
        match &self.content {
            NodeContent::Regular(data) => Ok(data),
            NodeContent::Directory(_) => Err(FsError::IsADirectory),
        }
    }

    pub fn bytes_mut(&mut self) -> Result<&mut Vec<u8>> {
        match &mut self.content {
            NodeContent::Regular(data) => Ok(data),
            NodeContent::Directory(_) => Err(FsError::IsADirectory),
        }
    }
}

/// Arena of all live nodes plus the id counter.
#[derive(Debug)]
pub(crate) struct NodeTable {
    nodes: HashMap<NodeId, Inode>,
    next: NodeId,
}

impl NodeTable {
    /// Empty table; the first allocation receives [`ROOT_ID`].
    pub fn new() -> NodeTable {
        NodeTable {
            nodes: HashMap::new(),
            next: ROOT_ID,
        }
    }

    /// Allocate a slot, hand its id to `build`, and store the node it
    /// returns. The id is passed in first so a directory can seed its own
    /// `.` entry before it exists in the table.
    pub fn allocate_with<F>(&mut self, build: F) -> Result<NodeId>
    where
        F: FnOnce(NodeId) -> Result<Inode>,
    {
        self.nodes.try_reserve(1)?;
        let id = self.next;
        let node = build(id)?;
        self.next += 1;
        self.nodes.insert(id, node);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Inode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Inode> {
        self.nodes.get_mut(&id)
    }

    /// Resolution-side access: every listing entry references a live node,
    /// so a miss means the name the caller resolved no longer exists.
    pub fn node(&self, id: NodeId) -> Result<&Inode> {
        self.get(id).ok_or(FsError::NoEntry)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Inode> {
        self.get_mut(id).ok_or(FsError::NoEntry)
    }

    /// Vacate a slot, returning the node. Ids are not recycled.
    pub fn remove(&mut self, id: NodeId) -> Option<Inode> {
        self.nodes.remove(&id)
    }

    /// Number of live nodes, orphans included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Empty the table, yielding whatever was still live.
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeId, Inode)> + '_ {
        self.nodes.drain()
    }
}
