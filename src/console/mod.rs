//! Serial console surface of the config store
//!
//! Consumes complete console lines from the firmware bus; line editing and
//! transport belong to the console driver.

pub mod commands;
pub mod parser;

pub use commands::{execute, verb_names, CommandContext, ConfigCommands, Dispatch, VERBS};
pub use parser::{parse_command, ParsedCommand};
