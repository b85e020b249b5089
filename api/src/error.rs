//! The error channel of the core.
//!
//! Every fallible core operation returns a [`Result`]: success with the
//! relevant payload, or exactly one [`FsError`] kind. The kinds are chosen to
//! align with the POSIX semantics the bridge surfaces, and the bridge
//! translates them 1:1 into host error codes through [`FsError::errno`]. No
//! other error type escapes the core boundary.
//!
//! Errors are plain enum variants rather than wrapped sources: the core
//! performs no I/O, so there is nothing foreign to wrap. The one conversion
//! that exists is [`From<TryReserveError>`], which turns a failed buffer or
//! listing growth into [`FsError::OutOfSpace`].

use std::collections::TryReserveError;
use thiserror::Error;

/// Error kinds reported by the core operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// A name was not found during resolution, or a path had no filename
    /// component to operate on.
    #[error("no such file or directory")]
    NoEntry,

    /// A non-terminal path component is a regular file, or an operation
    /// requiring a directory received a regular file.
    #[error("not a directory")]
    NotADirectory,

    /// A file-only operation received a directory.
    #[error("is a directory")]
    IsADirectory,

    /// The target name of an attach is already occupied in its directory.
    #[error("file exists")]
    AlreadyExists,

    /// Directory removal on a directory that still has user entries.
    #[error("directory not empty")]
    NotEmpty,

    /// Disallowed operation, such as hard-linking a directory.
    #[error("operation not permitted")]
    NotPermitted,

    /// The operation targeted the root directory, or an inode the bridge
    /// declines to touch while handles are open.
    #[error("resource busy")]
    Busy,

    /// Malformed path: missing leading `/`, an oversized or otherwise
    /// illegal name, or a rename into the moved subtree.
    #[error("invalid path")]
    InvalidPath,

    /// File operation through a handle whose inode is gone or has no open
    /// count.
    #[error("bad file handle")]
    BadHandle,

    /// Allocation failure while growing a listing or a content buffer.
    #[error("out of space")]
    OutOfSpace,
}

impl FsError {
    /// The host error code this kind translates to.
    pub fn errno(self) -> i32 {
        match self {
            FsError::NoEntry => libc::ENOENT,
            FsError::NotADirectory => libc::ENOTDIR,
            FsError::IsADirectory => libc::EISDIR,
            FsError::AlreadyExists => libc::EEXIST,
            FsError::NotEmpty => libc::ENOTEMPTY,
            FsError::NotPermitted => libc::EPERM,
            FsError::Busy => libc::EBUSY,
            FsError::InvalidPath => libc::EINVAL,
            FsError::BadHandle => libc::EBADF,
            FsError::OutOfSpace => libc::ENOSPC,
        }
    }
}

impl From<TryReserveError> for FsError {
    fn from(_: TryReserveError) -> FsError {
        FsError::OutOfSpace
    }
}

/// Generic alias for a `Result` with the error type `FsError`.
/// This shorthand is what the implementation uses throughout.
pub type Result<T> = std::result::Result<T, FsError>;
