//! In-memory filesystem
//!
//! Fixed capacity, no heap: up to `FILES` files of at most `CAPACITY` bytes.
//! Used for RAM-resident configs and by tests, which can inject read
//! failures or cut writes short to simulate power loss.

use heapless::{String, Vec};

use super::{ErrorType, Filesystem, OpenMode, Read, Seek, SeekFrom, Write};

/// Maximum path length.
pub const MAX_PATH_LEN: usize = 32;

/// RAM filesystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamFsError {
    /// No file at that path
    NotFound,
    /// Write on a handle opened read-only
    ReadOnly,
    /// File or file table is full, or path too long
    Full,
    /// Seek before the start of the file
    InvalidSeek,
    /// Failure injected by a test
    Injected,
}

impl embedded_io::Error for RamFsError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            RamFsError::NotFound => embedded_io::ErrorKind::NotFound,
            RamFsError::ReadOnly => embedded_io::ErrorKind::PermissionDenied,
            RamFsError::Full => embedded_io::ErrorKind::OutOfMemory,
            RamFsError::InvalidSeek => embedded_io::ErrorKind::InvalidInput,
            RamFsError::Injected => embedded_io::ErrorKind::Other,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    fail_reads: bool,
    /// Bytes that may still be written before writes start failing.
    write_budget: Option<usize>,
}

#[derive(Debug)]
struct RamEntry<const CAPACITY: usize> {
    path: String<MAX_PATH_LEN>,
    data: Vec<u8, CAPACITY>,
}

/// In-memory filesystem
///
/// # Example
///
/// ```
/// use rust_motion_config::storage::{Filesystem, OpenMode, RamFs, Read};
///
/// let mut fs: RamFs<2, 256> = RamFs::new();
/// fs.insert("/local/config", b"foo 1\n").unwrap();
///
/// let mut file = fs.open("/local/config", OpenMode::Read).unwrap();
/// let mut buf = [0u8; 16];
/// let n = file.read(&mut buf).unwrap();
/// assert_eq!(&buf[..n], b"foo 1\n");
/// ```
#[derive(Debug)]
pub struct RamFs<const FILES: usize, const CAPACITY: usize> {
    files: Vec<RamEntry<CAPACITY>, FILES>,
    faults: Faults,
    open_attempts: usize,
}

impl<const FILES: usize, const CAPACITY: usize> RamFs<FILES, CAPACITY> {
    /// Create an empty filesystem
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            faults: Faults {
                fail_reads: false,
                write_budget: None,
            },
            open_attempts: 0,
        }
    }

    /// Create or replace the file at `path`
    pub fn insert(&mut self, path: &str, contents: &[u8]) -> Result<(), RamFsError> {
        let data = Vec::from_slice(contents).map_err(|_| RamFsError::Full)?;

        if let Some(file) = self.find_mut(path) {
            file.data = data;
            return Ok(());
        }

        let mut name = String::new();
        name.push_str(path).map_err(|_| RamFsError::Full)?;
        self.files
            .push(RamEntry { path: name, data })
            .map_err(|_| RamFsError::Full)
    }

    /// Delete the file at `path`, if any
    pub fn remove(&mut self, path: &str) -> bool {
        match self.files.iter().position(|f| f.path.as_str() == path) {
            Some(idx) => {
                self.files.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Current contents of `path` (for test verification)
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|f| f.path.as_str() == path)
            .map(|f| f.data.as_slice())
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&mut self, fail: bool) {
        self.faults.fail_reads = fail;
    }

    /// Let only `bytes` more bytes be written, then fail every write.
    ///
    /// Simulates power loss part way through an update. `None` clears it.
    pub fn fail_writes_after(&mut self, bytes: Option<usize>) {
        self.faults.write_budget = bytes;
    }

    /// Number of `open` calls so far, successful or not
    pub fn open_attempts(&self) -> usize {
        self.open_attempts
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut RamEntry<CAPACITY>> {
        self.files.iter_mut().find(|f| f.path.as_str() == path)
    }
}

impl<const FILES: usize, const CAPACITY: usize> Default for RamFs<FILES, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// Open handle on a [`RamFs`] file
pub struct RamFile<'a, const CAPACITY: usize> {
    data: &'a mut Vec<u8, CAPACITY>,
    faults: &'a mut Faults,
    pos: usize,
    mode: OpenMode,
}

impl<const FILES: usize, const CAPACITY: usize> Filesystem for RamFs<FILES, CAPACITY> {
    type Error = RamFsError;
    type File<'a> = RamFile<'a, CAPACITY> where Self: 'a;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File<'_>, Self::Error> {
        self.open_attempts += 1;

        let Self { files, faults, .. } = self;
        let file = files
            .iter_mut()
            .find(|f| f.path.as_str() == path)
            .ok_or(RamFsError::NotFound)?;

        Ok(RamFile {
            data: &mut file.data,
            faults,
            pos: 0,
            mode,
        })
    }
}

impl<const CAPACITY: usize> ErrorType for RamFile<'_, CAPACITY> {
    type Error = RamFsError;
}

impl<const CAPACITY: usize> Read for RamFile<'_, CAPACITY> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.faults.fail_reads {
            return Err(RamFsError::Injected);
        }

        let available = self.data.len().saturating_sub(self.pos);
        let n = available.min(buf.len());
        if n == 0 {
            return Ok(0);
        }
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl<const CAPACITY: usize> Write for RamFile<'_, CAPACITY> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.mode == OpenMode::Read {
            return Err(RamFsError::ReadOnly);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        let mut n = buf.len();
        if let Some(budget) = self.faults.write_budget {
            if budget == 0 {
                return Err(RamFsError::Injected);
            }
            n = n.min(budget);
            self.faults.write_budget = Some(budget - n);
        }

        // Writes past the end grow the file
        let end = self.pos + n;
        if end > self.data.len() {
            self.data.resize(end, 0).map_err(|_| RamFsError::Full)?;
        }
        self.data[self.pos..end].copy_from_slice(&buf[..n]);
        self.pos = end;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<const CAPACITY: usize> Seek for RamFile<'_, CAPACITY> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(delta) => self.data.len() as i64 + delta,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
        };
        if target < 0 {
            return Err(RamFsError::InvalidSeek);
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }
}
