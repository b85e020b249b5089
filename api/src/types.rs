//! Module containing the types that cross the core boundary.
//!
//! The implementation keeps every inode in an arena addressed by [`NodeId`];
//! the identifiers double as the stable inode numbers the bridge reports to
//! the host. Everything here is plain data: attribute records, directory
//! entries and the two handle types the bridge holds between open and
//! release.

/// Stable identifier of an inode in the node arena.
///
/// Identifiers come from a monotonic counter and are never reused, so a
/// handle kept across an unlink can never alias a later allocation.
pub type NodeId = u64;

/// Identifier of the root directory inode.
pub const ROOT_ID: NodeId = 1;

/// Upper bound on the byte length of one directory-entry name, matching the
/// host name-max.
pub const NAME_MAX: usize = 255;

/// Returns true iff `name` may appear in a directory listing: non-empty, at
/// most [`NAME_MAX`] bytes, and free of `/` and NUL.
///
/// `.` and `..` pass this check; they are ordinary entries as far as a
/// listing is concerned and the namespace operations keep user names from
/// colliding with them.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= NAME_MAX && !name.bytes().any(|b| b == b'/' || b == 0)
}

/// The two file types the core stores.
///
/// The type component of an inode's `mode` distinguishes them; there are no
/// symlinks, devices or other special files.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FileKind {
    /// Directory file type
    Directory,
    /// Regular file type
    Regular,
}

impl FileKind {
    /// Extract the file type from mode bits, if the type component is one
    /// the core supports.
    pub fn from_mode(mode: u32) -> Option<FileKind> {
        match mode & (libc::S_IFMT as u32) {
            x if x == libc::S_IFDIR as u32 => Some(FileKind::Directory),
            x if x == libc::S_IFREG as u32 => Some(FileKind::Regular),
            _ => None,
        }
    }

    /// The `S_IFMT` type bits for this kind.
    pub fn mode_bits(self) -> u32 {
        match self {
            FileKind::Directory => libc::S_IFDIR as u32,
            FileKind::Regular => libc::S_IFREG as u32,
        }
    }

    /// Replace the type component of `mode` with this kind's bits, keeping
    /// the permission bits as given. The creation operations stamp the mode
    /// they store, so the type component always matches the node's payload.
    pub fn stamp(self, mode: u32) -> u32 {
        self.mode_bits() | (mode & !(libc::S_IFMT as u32))
    }
}

/// Attribute record reported by `getattr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttr {
    /// File-type-and-permission bits.
    pub mode: u32,
    /// Owner user identifier, opaque to the core.
    pub uid: u32,
    /// Owner group identifier, opaque to the core.
    pub gid: u32,
    /// Number of directory entries referring to the inode.
    pub nlink: u32,
    /// Byte length of the content; 0 for directories.
    pub size: u64,
}

/// Entry inside a directory listing: a name paired with the node it refers
/// to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The node this entry points at.
    pub node: NodeId,
    /// Entry name. Never empty, never contains `/` or NUL, at most
    /// [`NAME_MAX`] bytes.
    pub name: String,
}

impl DirEntry {
    /// Create a new directory entry, given `node` and `name`.
    /// Returns `None` if an invalid name is provided.
    pub fn new(node: NodeId, name: &str) -> Option<DirEntry> {
        if !valid_name(name) {
            return None;
        }
        Some(DirEntry {
            node,
            name: name.to_string(),
        })
    }
}

/// Handle to an open regular file, obtained from `open`.
///
/// The handle carries the inode it was opened on and keeps that inode alive
/// until the matching `release`, even if every name referring to it is
/// unlinked in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHandle {
    /// The node this handle keeps open.
    pub node: NodeId,
}

/// Handle to an open directory, obtained from `opendir` and used for entry
/// enumeration until the matching `releasedir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirHandle {
    /// The node this handle keeps open.
    pub node: NodeId,
}

///Tests for names and mode bits
#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn name_validity() {
        assert!(valid_name("x"));
        assert!(valid_name("file.txt"));
        assert!(valid_name("."));
        assert!(valid_name(".."));
        assert!(valid_name(&"n".repeat(NAME_MAX)));

        assert!(!valid_name(""));
        assert!(!valid_name("a/b"));
        assert!(!valid_name("a\0b"));
        assert!(!valid_name(&"n".repeat(NAME_MAX + 1)));

        assert!(DirEntry::new(3, "ok").is_some());
        assert!(DirEntry::new(3, "not/ok").is_none());
    }

    #[test]
    fn mode_round_trip() {
        let file = FileKind::Regular.stamp(0o644);
        assert_eq!(FileKind::from_mode(file), Some(FileKind::Regular));
        assert_eq!(file & 0o777, 0o644);

        let dir = FileKind::Directory.stamp(0o755);
        assert_eq!(FileKind::from_mode(dir), Some(FileKind::Directory));
        assert_eq!(dir & 0o777, 0o755);

        //stamping overrides whatever type bits the caller passed
        let forced = FileKind::Regular.stamp(dir);
        assert_eq!(FileKind::from_mode(forced), Some(FileKind::Regular));
        assert_eq!(forced & 0o777, 0o755);

        assert_eq!(FileKind::from_mode(0o644), None);
    }

    #[test]
    fn errno_mapping() {
        use crate::error::FsError;
        assert_eq!(FsError::NoEntry.errno(), libc::ENOENT);
        assert_eq!(FsError::NotEmpty.errno(), libc::ENOTEMPTY);
        assert_eq!(FsError::OutOfSpace.errno(), libc::ENOSPC);
    }
}
