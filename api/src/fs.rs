//! Collection of the traits the in-memory core implements.
//!
//! The traits form a supertrait chain, lowest concern first: a filesystem
//! value exists ([`FileSysSupport`]), its directories can be queried
//! ([`DirectorySupport`]), paths resolve to nodes ([`PathSupport`]), the
//! namespace can be mutated ([`NamespaceSupport`]), and finally content and
//! listings can be streamed through handles ([`FileRWSupport`],
//! [`DirStreamSupport`]). A bridge programs against this chain and never
//! against the implementation type directly.
//!
//! All operations are request/response: nothing suspends, nothing spawns.
//! The bridge serializes requests; an implementation that must survive a
//! multi-threaded bridge configuration can be wrapped in one coarse mutex.

use std::error;

use crate::types::{DirEntry, DirHandle, FileAttr, FileHandle, NodeId};

/// Base trait every filesystem value implements: construction at mount time
/// and teardown at shutdown.
pub trait FileSysSupport: Sized {
    /// The error type of the implementation.
    ///
    /// Note the supertrait bound: the base trait for all Rust errors, so the
    /// bridge can display any failure it does not translate.
    type Error: error::Error;

    /// Construct an empty filesystem: a root directory with mode
    /// directory-plus-full-permissions whose `.` and `..` both refer to the
    /// root itself. The root's link count is initialized so that no sequence
    /// of namespace operations can drive it to zero.
    fn init() -> Result<Self, Self::Error>;

    /// Tear the whole node graph down, consuming the filesystem.
    ///
    /// Must run to completion even though every directory participates in
    /// reference cycles through `.` and `..`, and must cope with orphan
    /// nodes that are no longer reachable from the root. Outstanding open
    /// handles are diagnosed, not honored: the bridge is shutting down.
    fn destroy(self);
}

/// Queries against one directory node, addressed by id.
///
/// These are the listing primitives the path walker is built from; entry
/// creation and removal are not exposed here because only the namespace
/// operations may touch link counts.
pub trait DirectorySupport: FileSysSupport {
    /// Look up the entry named `name` in the listing of `dir` and return the
    /// node it refers to. The match is byte-wise on the full name, so an
    /// entry whose name is a prefix of `name` does not match. `.` and `..`
    /// resolve like any other entry.
    ///
    /// Errors with `no-such-entry` if absent and `not-a-directory` if `dir`
    /// is a regular file.
    fn dir_lookup(&self, dir: NodeId, name: &str) -> Result<NodeId, Self::Error>;

    /// True iff the listing of `dir` contains exactly `.` and `..`.
    fn dir_is_empty(&self, dir: NodeId) -> Result<bool, Self::Error>;
}

/// Resolution of slash-separated paths against the node graph.
pub trait PathSupport: DirectorySupport {
    /// Returns true iff `name` may be used for a directory entry.
    fn valid_name(name: &str) -> bool;

    /// Walk `path` from the root and return the node it names.
    ///
    /// A leading `/` is optional and consumed if present; an empty remainder
    /// names the starting node itself. Fails with `no-such-entry` when a
    /// segment is absent and `not-a-directory` when a non-terminal segment
    /// resolves to a regular file.
    fn resolve_path(&self, path: &str) -> Result<NodeId, Self::Error>;

    /// Split `path` on its final `/` and return the directory the prefix
    /// names together with the trailing filename. An empty prefix means the
    /// root.
    ///
    /// Unlike [`PathSupport::resolve_path`], the leading `/` is mandatory
    /// here: this is the entry point for mutating operations and those only
    /// accept absolute paths. Fails with `invalid-path` when the slash is
    /// missing and `no-such-entry` when the path is empty or has an empty
    /// filename.
    fn resolve_parent<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str), Self::Error>;
}

/// The operations that mutate the namespace graph.
///
/// Each one resolves its path(s), rewires directory entries and maintains
/// the link-count invariants: a regular file's count equals the number of
/// entries referring to it anywhere in the tree, a directory's count is 2
/// (its `.` plus the entry or self-reference of its parent) plus one per
/// child directory's `..`.
pub trait NamespaceSupport: PathSupport {
    /// Report the attribute record of the node `path` names.
    fn getattr(&self, path: &str) -> Result<FileAttr, Self::Error>;

    /// Create an empty regular file at `path` and return its node.
    ///
    /// The type component of `mode` is stamped to "regular file" regardless
    /// of what the caller passed. Fails with `already-exists` when the name
    /// is taken, and with the resolution errors of
    /// [`PathSupport::resolve_parent`].
    fn mknod(&mut self, path: &str, mode: u32, uid: u32, gid: u32)
        -> Result<NodeId, Self::Error>;

    /// Create an empty directory at `path` and return its node.
    ///
    /// The new directory starts with `.` and `..` (in this order) referring
    /// to itself and its parent; the parent gains one link for the child's
    /// `..`. Failure modes are those of [`NamespaceSupport::mknod`].
    fn mkdir(&mut self, path: &str, mode: u32, uid: u32, gid: u32)
        -> Result<NodeId, Self::Error>;

    /// Attach a second name for the node `existing` names at `new`.
    ///
    /// The node's link count grows by one; its canonical parent stays with
    /// the directory that first attached it. Hard-linking a directory fails
    /// with `not-permitted`.
    fn link(&mut self, existing: &str, new: &str) -> Result<NodeId, Self::Error>;

    /// Detach the entry `path` names. Directories fail with
    /// `is-a-directory`.
    ///
    /// The target's link count drops by one. When it reaches zero the node
    /// is destroyed immediately if no handles are open, and otherwise lives
    /// on as an orphan: invisible to resolution, fully readable and
    /// writable through the handles that survive, destroyed by the last
    /// release.
    fn unlink(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Remove the empty directory `path` names.
    ///
    /// Fails with `busy` for the root, `not-a-directory` for files,
    /// `not-empty` when user entries remain and `invalid-path` when the
    /// final segment is `.` or `..`. Removal cancels the child's `..`
    /// back-reference, so the parent loses one link.
    fn rmdir(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Atomically relocate the entry `old` names to `new`.
    ///
    /// Neither path may contain a segment that is exactly `.` or `..`
    /// (names merely containing dots are fine), and `new` must not be a
    /// descendant of `old`; both are `invalid-path`. An existing regular
    /// file at `new` is released first, an existing directory is
    /// `is-a-directory`. The moved node's link count is conserved and its
    /// canonical parent is not updated.
    fn rename(&mut self, old: &str, new: &str) -> Result<(), Self::Error>;

    /// Resize the content buffer of the regular file `path` names. Growth
    /// zero-fills; truncation to zero releases the buffer entirely.
    fn truncate(&mut self, path: &str, size: u64) -> Result<(), Self::Error>;
}

/// Content access through open handles.
///
/// A handle pins its inode: the open count stays positive until the
/// matching release, which is what carries an unlinked-but-open file through
/// its orphan state. Operations on a handle whose inode is gone or has no
/// open count fail with `bad-handle`.
pub trait FileRWSupport: NamespaceSupport {
    /// Open the regular file `path` names and bump its open count.
    /// Directories fail with `is-a-directory`.
    fn open(&mut self, path: &str) -> Result<FileHandle, Self::Error>;

    /// Read up to `size` bytes starting at byte `offset`.
    ///
    /// A read crossing the end of the file is clamped to the file size, not
    /// an error; a read starting at or past the end returns an empty slice.
    /// The returned slice borrows the file's buffer directly.
    fn read(&self, fh: FileHandle, offset: u64, size: u64) -> Result<&[u8], Self::Error>;

    /// Write `data` at byte `offset`, growing the file as needed, and
    /// return the number of bytes written.
    ///
    /// A write starting past the current end zero-fills the gap first. A
    /// write whose end cannot be represented or allocated fails with
    /// `out-of-space` and leaves the file untouched.
    fn write(&mut self, fh: FileHandle, data: &[u8], offset: u64) -> Result<u64, Self::Error>;

    /// Drop one open count. The last release of an orphan destroys the
    /// node.
    fn release(&mut self, fh: FileHandle) -> Result<(), Self::Error>;
}

/// Listing enumeration through open handles, the readdir side of the bridge.
pub trait DirStreamSupport: NamespaceSupport {
    /// Open the directory `path` names for enumeration and bump its open
    /// count. Regular files fail with `not-a-directory`.
    fn opendir(&mut self, path: &str) -> Result<DirHandle, Self::Error>;

    /// Return the entries of the open directory in listing order: `.`, then
    /// `..`, then user entries oldest first.
    fn readdir(&self, dh: DirHandle) -> Result<Vec<DirEntry>, Self::Error>;

    /// Drop one open count on the directory.
    fn releasedir(&mut self, dh: DirHandle) -> Result<(), Self::Error>;
}
