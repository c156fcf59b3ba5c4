//! `std::fs` backed filesystem
//!
//! Maps firmware paths such as `/local/config` onto a root directory. On a
//! desktop the root is any directory; on ESP-IDF it is `/`, where the VFS
//! exposes mounted flash and SD partitions.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use super::{ErrorType, Filesystem, OpenMode, Read, Seek, SeekFrom, Write};

/// Host filesystem rooted at a directory
#[derive(Debug, Clone)]
pub struct HostFs {
    root: PathBuf,
}

impl HostFs {
    /// Resolve firmware paths below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for a firmware path
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

/// Open handle on a host file
#[derive(Debug)]
pub struct HostFile(File);

impl Filesystem for HostFs {
    type Error = io::Error;
    type File<'a> = HostFile where Self: 'a;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File<'_>, Self::Error> {
        let mut options = OpenOptions::new();
        options.read(true);
        if mode == OpenMode::ReadWrite {
            options.write(true);
        }
        options.open(self.resolve(path)).map(HostFile)
    }
}

impl ErrorType for HostFile {
    type Error = io::Error;
}

impl Read for HostFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        io::Read::read(&mut self.0, buf)
    }
}

impl Write for HostFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        io::Write::write(&mut self.0, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.0)
    }
}

impl Seek for HostFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let pos = match pos {
            SeekFrom::Start(offset) => io::SeekFrom::Start(offset),
            SeekFrom::End(delta) => io::SeekFrom::End(delta),
            SeekFrom::Current(delta) => io::SeekFrom::Current(delta),
        };
        io::Seek::seek(&mut self.0, pos)
    }
}
