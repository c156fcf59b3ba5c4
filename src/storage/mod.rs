//! Storage backends for the config file
//!
//! The store only needs open/read/seek/write/close on a named path. Handles
//! close when dropped, so every exit path of the reader and writer releases
//! its file.

pub mod ram;

#[cfg(feature = "std")]
pub mod host;

pub use embedded_io::{ErrorType, Read, Seek, SeekFrom, Write};
pub use ram::{RamFs, RamFsError};

#[cfg(feature = "std")]
pub use host::HostFs;

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only.
    Read,
    /// Read and positioned writes. Never creates, never truncates.
    ReadWrite,
}

/// A filesystem that can open named paths.
pub trait Filesystem {
    /// Error reported by `open` and by file handles.
    type Error: embedded_io::Error;

    /// Open file handle. Dropping it closes the file.
    type File<'a>: Read + Write + Seek + ErrorType<Error = Self::Error>
    where
        Self: 'a;

    /// Open `path` in `mode`.
    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File<'_>, Self::Error>;
}
