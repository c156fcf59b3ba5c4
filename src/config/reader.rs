//! Config reader

use embedded_io::Read;

use super::line::{parse_line, ParsedLine};
use super::line_buffer::LineScanner;
use super::value::ConfigValue;
use crate::cfg_warn;
use crate::hash::{hash_bytes, NameOf};
use crate::logging::LogStream;

/// Outcome of scanning for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// First matching line: its start offset and layout
    Found(u64, ParsedLine),
    /// First matching line is longer than `LINE_SIZE` and its value runs
    /// past the bytes kept; the scan stops there
    Truncated(u64),
    /// No line matched
    Missing,
}

/// Scan forward to the first entry whose key hashes to `hash`.
///
/// On a match the line stays in `scanner`. Comments and short lines are
/// skipped. An overlong line is matched on the prefix kept in the buffer;
/// it is usable only if a `#` or `\r` after the key falls inside that
/// prefix, so its value span is complete.
pub(crate) fn find_entry<R: Read>(
    scanner: &mut LineScanner,
    file: &mut R,
    hash: u16,
    log: &LogStream,
) -> Result<Entry, R::Error> {
    while let Some(line_start) = scanner.next_line(file)? {
        let line = scanner.line();
        let bytes = line.as_bytes();
        let Some(parsed) = parse_line(bytes) else {
            continue;
        };

        if line.overflowed() && parsed.end_key == bytes.len() {
            cfg_warn!(log, "config: skipping line at byte {}: key longer than {}", line_start, bytes.len());
            continue;
        }
        if hash_bytes(parsed.key(bytes)) != hash {
            continue;
        }

        if line.overflowed() && !bytes[parsed.end_key..].iter().any(|&b| b == b'#' || b == b'\r') {
            cfg_warn!(log, "config: line at byte {} longer than {}", line_start, bytes.len());
            return Ok(Entry::Truncated(line_start));
        }
        return Ok(Entry::Found(line_start, parsed));
    }
    Ok(Entry::Missing)
}

/// Look up `hash` in an open config file.
///
/// One pass, first match wins. A read error ends the scan as if the file
/// ended there.
pub(crate) fn read_value<R: Read>(file: &mut R, hash: u16, log: &LogStream) -> ConfigValue {
    let mut scanner = LineScanner::new();

    match find_entry(&mut scanner, file, hash, log) {
        Ok(Entry::Found(_, parsed)) => {
            let bytes = scanner.line().as_bytes();
            ConfigValue::from_line(hash, parsed.key(bytes), parsed.value(bytes))
        }
        Ok(Entry::Truncated(_)) | Ok(Entry::Missing) => ConfigValue::missing(hash),
        Err(_) => {
            cfg_warn!(log, "config: read error looking up {}", NameOf(hash));
            ConfigValue::missing(hash)
        }
    }
}
