//! Line buffer and scanner for config file input

use embedded_io::Read;

/// Maximum config line length, excluding the `\n`
pub const LINE_SIZE: usize = 128;

/// Bytes pulled from storage per read call
const CHUNK_SIZE: usize = 32;

/// Fixed line buffer
///
/// Bytes past `LINE_SIZE` are discarded and the line is marked overflowed.
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
    overflowed: bool,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            overflowed: false,
        }
    }

    /// Push a byte
    pub fn push(&mut self, c: u8) {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
        } else {
            self.overflowed = true;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Whether bytes were dropped since the last clear
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a file into `\n`-terminated lines, tracking the file offset at
/// which each line starts.
///
/// Holds one line and one read chunk; nothing proportional to file size.
pub struct LineScanner {
    line: LineBuffer,
    chunk: [u8; CHUNK_SIZE],
    filled: usize,
    pos: usize,
    /// File offset of the next unconsumed byte
    offset: u64,
    eof: bool,
}

impl LineScanner {
    /// Start scanning at file offset 0
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            chunk: [0u8; CHUNK_SIZE],
            filled: 0,
            pos: 0,
            offset: 0,
            eof: false,
        }
    }

    /// Read the next line into the buffer.
    ///
    /// Returns the file offset of the line's first byte, or `None` at end of
    /// file. A final line without `\n` is still returned.
    pub fn next_line<R: Read>(&mut self, src: &mut R) -> Result<Option<u64>, R::Error> {
        if self.eof {
            return Ok(None);
        }

        self.line.clear();
        let start = self.offset;

        loop {
            if self.pos == self.filled {
                let n = src.read(&mut self.chunk)?;
                if n == 0 {
                    self.eof = true;
                    return Ok(if self.offset > start { Some(start) } else { None });
                }
                self.filled = n;
                self.pos = 0;
            }

            let byte = self.chunk[self.pos];
            self.pos += 1;
            self.offset += 1;

            if byte == b'\n' {
                return Ok(Some(start));
            }
            self.line.push(byte);
        }
    }

    /// The line read by the last successful `next_line`
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}
