//! Non-blocking logging for the config store.
//!
//! ```text
//! event handler          LogStream            serial drain
//! ─────────────          ─────────            ────────────
//!
//! cfg_warn!() ─────────▶ [L0][L1][L2] ──────▶ drain_to(out)
//! never blocks           lock-free            at leisure
//!                        ring buffer
//! ```
//!
//! Config operations run inside the firmware's event loop and may already be
//! stalled on storage I/O, so logging must not add a second blocking sink.
//! Messages are formatted into a fixed stack buffer and queued; if the ring
//! is full they are dropped and counted.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 80;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 16;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Position of this entry in the stream since boot.
    pub seq: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes.
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        seq: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

/// Lock-free log stream with a level threshold.
///
/// - `push` never blocks; it reserves a slot with a CAS on the write index
///   and drops the message if the ring is full
/// - `drain` is called from a single consumer
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
    level: AtomicU8,
}

// SAFETY: producers reserve distinct slots through compare_exchange on
// write_idx; the single consumer only reads slots below write_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream at `Info` level.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Most verbose level that is still recorded.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Change the threshold. Messages above it are discarded before formatting.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a message at `level` would be recorded.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    pub fn push(&self, level: LogLevel, msg: &[u8]) -> bool {
        let mut write = self.write_idx.load(Ordering::Acquire);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let idx = (write as usize) & Self::MASK;
        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: the CAS above handed this slot to us alone.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.seq = write;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }

        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available.
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot is below write_idx
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = SliceWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl core::fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let to_write = bytes.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Write every pending entry to `out` as `[seq] LEVEL: message\r\n`.
///
/// A summary line is appended if messages were dropped since the last drain.
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn core::fmt::Write) -> usize {
    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let _ = write!(
            out,
            "[{:6}] {}: {}\r\n",
            entry.seq,
            entry.level.as_str(),
            entry.message()
        );
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = write!(out, "[------] WARN: {} log messages dropped\r\n", dropped);
        stream.reset_dropped();
    }
    count
}

/// Non-blocking log macro.
///
/// # Example
///
/// ```ignore
/// cfg_log!(LogLevel::Info, CONFIG_LOG, "active config: {}", path);
/// ```
#[macro_export]
macro_rules! cfg_log {
    ($level:expr, $stream:expr, $($arg:tt)*) => {{
        let level = $level;
        if $stream.enabled(level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $stream.push(level, &buf[..len]);
        }
    }};
}

/// Error log.
#[macro_export]
macro_rules! cfg_error {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cfg_log!($crate::logging::LogLevel::Error, $stream, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! cfg_warn {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cfg_log!($crate::logging::LogLevel::Warn, $stream, $($arg)*)
    };
}

/// Info log.
#[macro_export]
macro_rules! cfg_info {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cfg_log!($crate::logging::LogLevel::Info, $stream, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! cfg_debug {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cfg_log!($crate::logging::LogLevel::Debug, $stream, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_stream_basic() {
        let stream = LogStream::<16>::new();

        assert!(stream.push(LogLevel::Info, b"test message"));
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.seq, 0);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message(), "test message");

        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn test_log_stream_full() {
        let stream = LogStream::<4>::new();

        assert!(stream.push(LogLevel::Info, b"1"));
        assert!(stream.push(LogLevel::Info, b"2"));
        assert!(stream.push(LogLevel::Info, b"3"));
        assert!(stream.push(LogLevel::Info, b"4"));

        // Should drop without advancing the ring
        assert!(!stream.push(LogLevel::Info, b"5"));
        assert_eq!(stream.dropped(), 1);
        assert_eq!(stream.pending(), 4);

        stream.drain();
        assert!(stream.push(LogLevel::Info, b"6"));

        let messages: Vec<_> = core::iter::from_fn(|| stream.drain())
            .map(|e| e.message().to_string())
            .collect();
        assert_eq!(messages, ["2", "3", "4", "6"]);
    }

    #[test]
    fn test_level_threshold() {
        let stream = LogStream::<8>::new();
        stream.set_level(LogLevel::Warn);

        cfg_info!(stream, "hidden {}", 1);
        cfg_warn!(stream, "shown {}", 2);
        cfg_error!(stream, "shown {}", 3);

        assert_eq!(stream.pending(), 2);
        assert_eq!(stream.level(), LogLevel::Warn);
    }

    #[test]
    fn test_format_to_buffer_truncates() {
        let mut buf = [0u8; 8];
        let len = format_to_buffer(&mut buf, format_args!("Hello {}", 424242));
        assert_eq!(&buf[..len], b"Hello 42");
    }

    #[test]
    fn test_drain_to_format() {
        let stream = LogStream::<4>::new();
        cfg_warn!(stream, "no config file");
        for _ in 0..4 {
            cfg_info!(stream, "filler");
        }

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 4);
        assert!(out.starts_with("[     0] WARN: no config file\r\n"));
        assert!(out.contains("1 log messages dropped"));
        assert_eq!(stream.dropped(), 0);
    }
}
