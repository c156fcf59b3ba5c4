//! Config line parser
//!
//! ```text
//!   stepper.alpha.step_pin 1.19      # comment
//!   ^begin_key            ^end_key
//!                          ^begin
//!                              ^end_reader
//!                                    ^end_writer
//! ```
//!
//! The reader stops the value at the first space; the writer's span runs to
//! the comment or line end so that trailing spaces act as padding a longer
//! value can grow into.

/// Location of a value on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpan {
    /// First byte of the value
    pub begin: usize,
    /// First space, `#`, `\r` or `\n` after `begin`, or the line length
    pub end_reader: usize,
    /// First `#`, `\r` or `\n` after `begin`, or the line length
    pub end_writer: usize,
}

impl ValueSpan {
    /// Bytes the writer may overwrite, padding included
    pub fn free_space(&self) -> usize {
        self.end_writer - self.begin
    }
}

/// A config entry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine {
    pub begin_key: usize,
    pub end_key: usize,
    /// `None` when the key is followed by nothing but spaces or a comment
    pub value: Option<ValueSpan>,
}

impl ParsedLine {
    /// Key bytes of `line`
    pub fn key<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        &line[self.begin_key..self.end_key]
    }

    /// Value as the reader sees it (no padding)
    pub fn value<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        match self.value {
            Some(span) => &line[span.begin..span.end_reader],
            None => &[],
        }
    }
}

/// Parse a line without its trailing `\n`.
///
/// Returns `None` for comments (`#` in column 0), lines shorter than three
/// bytes and lines made only of spaces.
pub fn parse_line(line: &[u8]) -> Option<ParsedLine> {
    if line.len() < 3 || line[0] == b'#' {
        return None;
    }

    let begin_key = line.iter().position(|&b| b != b' ')?;
    let end_key = find_from(line, begin_key, |b| b == b' ').unwrap_or(line.len());

    let value = find_from(line, end_key, |b| b != b' ')
        .filter(|&begin| !matches!(line[begin], b'#' | b'\r' | b'\n'))
        .map(|begin| ValueSpan {
            begin,
            end_reader: find_from(line, begin + 1, |b| matches!(b, b' ' | b'#' | b'\r' | b'\n'))
                .unwrap_or(line.len()),
            end_writer: find_from(line, begin + 1, |b| matches!(b, b'#' | b'\r' | b'\n'))
                .unwrap_or(line.len()),
        });

    Some(ParsedLine {
        begin_key,
        end_key,
        value,
    })
}

fn find_from(line: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> Option<usize> {
    line.get(from..)?
        .iter()
        .position(|&b| pred(b))
        .map(|idx| from + idx)
}
