//! Console line parser
//!
//! Simple split on whitespace, max 2 arguments.

use crate::hash::name_hash;

/// Parsed console line with up to 2 arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The verb (first token)
    pub command: &'a str,
    /// Up to 2 arguments
    pub args: [Option<&'a str>; 2],
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Hash of the verb, as matched against the verb table
    pub fn verb_hash(&self) -> u16 {
        name_hash(self.command)
    }
}

/// Parse a console line into verb and arguments
pub fn parse_command(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None, None];
    for (i, arg) in parts.take(2).enumerate() {
        args[i] = Some(arg);
    }

    ParsedCommand { command, args }
}
