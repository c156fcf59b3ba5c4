//! In-place config writer
//!
//! Only the value span of the matching line is rewritten: the new value
//! followed by spaces up to the old span length. File size and every other
//! byte stay as they were. There is no journal; losing power during the
//! write can leave that one value half written.

use embedded_io::{Read, Seek, SeekFrom, Write};

use super::line_buffer::LineScanner;
use super::reader::{find_entry, Entry};
use crate::error::ConfigError;
use crate::logging::LogStream;

/// Source of padding bytes, written in slices
const PADDING: [u8; 16] = [b' '; 16];

/// Check that `value` reads back unchanged: non-empty, and free of the
/// bytes that end a value.
pub(crate) fn validate(value: &str) -> Result<(), ConfigError> {
    let bytes = value.as_bytes();
    if bytes.is_empty() || bytes.iter().any(|&b| matches!(b, b' ' | b'#' | b'\r' | b'\n')) {
        return Err(ConfigError::InvalidValue);
    }
    Ok(())
}

/// Overwrite the value of the first entry matching `hash` in an open file.
///
/// The value must be strictly shorter than the span, so at least one space
/// is left between it and a trailing comment.
pub(crate) fn write_value<F: Read + Write + Seek>(
    file: &mut F,
    hash: u16,
    value: &str,
    log: &LogStream,
) -> Result<(), ConfigError> {
    let mut scanner = LineScanner::new();
    let (line_start, parsed) = match find_entry(&mut scanner, file, hash, log) {
        Ok(Entry::Found(line_start, parsed)) => (line_start, parsed),
        Ok(Entry::Truncated(_)) => return Err(ConfigError::LineTooLong),
        Ok(Entry::Missing) => return Err(ConfigError::KeyNotFound),
        Err(_) => return Err(ConfigError::Io),
    };

    let span = parsed.value.ok_or(ConfigError::NoValue)?;
    let free_space = span.free_space();
    if value.len() >= free_space {
        return Err(ConfigError::NotEnoughRoom);
    }

    file.seek(SeekFrom::Start(line_start + span.begin as u64))
        .map_err(|_| ConfigError::Io)?;
    file.write_all(value.as_bytes()).map_err(|_| ConfigError::Io)?;

    let mut remaining = free_space - value.len();
    while remaining > 0 {
        let n = remaining.min(PADDING.len());
        file.write_all(&PADDING[..n]).map_err(|_| ConfigError::Io)?;
        remaining -= n;
    }

    file.flush().map_err(|_| ConfigError::Io)
}
