//! Config console verbs
//!
//! The verb is matched by hash against a static table, so the verb strings
//! themselves need not be compared at runtime.

use core::fmt::Write;

use super::parser::{parse_command, ParsedCommand};
use crate::config::Settings;
use crate::error::ConfigError;
use crate::events::{Event, EventKind, EventSink};
use crate::hash::{name_hash, names};
use crate::log_globals::CONFIG_LOG;
use crate::logging::LogStream;
use crate::{cfg_debug, cfg_info};

/// Everything a verb handler may touch
pub struct CommandContext<'a> {
    /// The config store
    pub settings: &'a mut dyn Settings,
    /// Serial console output
    pub serial: &'a mut dyn Write,
    /// Firmware event bus
    pub bus: &'a mut dyn EventSink,
}

/// Verb descriptor
pub struct VerbDescriptor {
    pub name: &'static str,
    pub hash: u16,
    pub brief: &'static str,
    pub handler: fn(&ParsedCommand<'_>, &mut CommandContext<'_>) -> Result<(), ConfigError>,
}

/// All config verbs
pub static VERBS: &[VerbDescriptor] = &[
    VerbDescriptor {
        name: "config-get",
        hash: names::CONFIG_GET,
        brief: "Print a setting's value",
        handler: cmd_get,
    },
    VerbDescriptor {
        name: "config-set",
        hash: names::CONFIG_SET,
        brief: "Overwrite a setting's value in place",
        handler: cmd_set,
    },
    VerbDescriptor {
        name: "config-load",
        hash: names::CONFIG_LOAD,
        brief: "Tell every module to re-read its settings",
        handler: cmd_load,
    },
];

/// Outcome of offering a line to the config verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a config verb; other modules may claim the line
    Ignored,
    /// A config verb ran
    Handled(Result<(), ConfigError>),
}

/// Get all verb names
pub fn verb_names() -> impl Iterator<Item = &'static str> {
    VERBS.iter().map(|v| v.name)
}

/// Execute a parsed command if its verb is a config verb.
pub fn execute(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Dispatch {
    let hash = cmd.verb_hash();
    match VERBS.iter().find(|v| v.hash == hash) {
        Some(verb) => Dispatch::Handled((verb.handler)(cmd, ctx)),
        None => Dispatch::Ignored,
    }
}

/// Console subscriber for the config verbs.
pub struct ConfigCommands {
    log: &'static LogStream,
}

impl ConfigCommands {
    /// Events this module wants from the bus
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::ConsoleLineReceived];

    pub fn new() -> Self {
        Self { log: &CONFIG_LOG }
    }

    /// Log to `log` instead of [`CONFIG_LOG`].
    pub fn with_log(log: &'static LogStream) -> Self {
        Self { log }
    }

    /// Handle a bus event. Only console lines are acted upon.
    pub fn on_event(&mut self, event: &Event<'_>, ctx: &mut CommandContext<'_>) -> Dispatch {
        match event {
            Event::ConsoleLineReceived(line) => self.on_console_line(line, ctx),
            _ => Dispatch::Ignored,
        }
    }

    /// Handle one console line.
    ///
    /// Errors are printed to the serial sink as `ERROR: <message>\r\n`.
    pub fn on_console_line(&mut self, line: &str, ctx: &mut CommandContext<'_>) -> Dispatch {
        let cmd = parse_command(line);
        let dispatch = execute(&cmd, ctx);

        match dispatch {
            Dispatch::Handled(Err(e)) => {
                let _ = write!(ctx.serial, "{}\r\n", e);
                cfg_debug!(self.log, "console: {} -> {}", cmd.command, e.code());
            }
            Dispatch::Handled(Ok(())) if cmd.verb_hash() == names::CONFIG_LOAD => {
                cfg_info!(self.log, "config: reload broadcast");
            }
            Dispatch::Handled(Ok(())) => {
                cfg_debug!(self.log, "console: {} ok", cmd.command);
            }
            Dispatch::Ignored => {}
        }
        dispatch
    }
}

impl Default for ConfigCommands {
    fn default() -> Self {
        Self::new()
    }
}

// --- Verb Implementations ---

fn cmd_get(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConfigError> {
    // A bare `config-get` looks up the empty name and prints an empty line
    let name = cmd.arg(0).unwrap_or("");

    let value = ctx.settings.value(name_hash(name));
    let _ = write!(ctx.serial, "{}\r\n", value.as_str());
    Ok(())
}

fn cmd_set(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConfigError> {
    let name = cmd.arg(0).ok_or(ConfigError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConfigError::MissingArg)?;

    ctx.settings.set_string(name_hash(name), value)
}

fn cmd_load(_cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConfigError> {
    ctx.bus.publish(Event::ConfigReload);
    Ok(())
}
