//! Module: config
//!
//! Purpose: Hash-addressed settings stored as text lines in a flat file.
//!
//! Architecture:
//! - locator: picks the active file from an ordered candidate list, once
//! - reader: one pass over the file, first line whose key hashes to the
//!   requested id wins
//! - writer: rewrites that line's value span in place, padded with spaces,
//!   so the file never grows or shrinks
//! - Every file handle lives for one operation and is released on drop
//!
//! Safety: single-threaded. Operations block on storage I/O and run to
//! completion inside the caller's event handler.

pub mod line;
pub mod line_buffer;
pub mod locator;
pub mod reader;
pub mod value;
pub mod writer;

pub use line::{parse_line, ParsedLine, ValueSpan};
pub use line_buffer::{LineBuffer, LineScanner, LINE_SIZE};
pub use locator::DEFAULT_CANDIDATES;
pub use value::ConfigValue;

use crate::error::ConfigError;
use crate::hash::{name_hash, NameOf};
use crate::log_globals::CONFIG_LOG;
use crate::logging::{LogLevel, LogStream};
use crate::storage::{Filesystem, OpenMode};
use crate::{cfg_debug, cfg_info, cfg_warn};

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Paths probed in order for the config file
    pub candidates: &'static [&'static str],
    /// Threshold applied to the store's log stream
    pub log_level: LogLevel,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES,
            log_level: LogLevel::Info,
        }
    }
}

/// Read/update access to settings, as handed to consuming modules.
pub trait Settings {
    /// Look up a setting by hash.
    fn value(&mut self, hash: u16) -> ConfigValue;

    /// Replace a setting's value in place.
    fn set_string(&mut self, hash: u16, value: &str) -> Result<(), ConfigError>;
}

/// The config store.
///
/// One instance lives for the whole firmware run and is passed to the
/// modules that need it.
///
/// # Example
///
/// ```
/// use rust_motion_config::config::Config;
/// use rust_motion_config::hash::name_hash;
/// use rust_motion_config::storage::RamFs;
///
/// let mut fs: RamFs<2, 256> = RamFs::new();
/// fs.insert("/local/config", b"planner.acceleration 3000   \n").unwrap();
///
/// let mut config = Config::new(fs);
/// config.set_string(name_hash("planner.acceleration"), "4500").unwrap();
/// assert_eq!(config.get("planner.acceleration").as_str(), "4500");
/// ```
pub struct Config<F: Filesystem> {
    fs: F,
    settings: StoreSettings,
    active: Option<&'static str>,
    log: &'static LogStream,
    /// Whether `settings.log_level` has been applied to `log`
    level_applied: bool,
}

impl<F: Filesystem> Config<F> {
    /// Store over `fs` with default settings, logging to [`CONFIG_LOG`].
    pub fn new(fs: F) -> Self {
        Self::with_settings(fs, StoreSettings::default())
    }

    /// Store over `fs` with explicit settings.
    ///
    /// The log level is applied to the store's stream on first use, so a
    /// stream swapped in by [`Config::with_log`] is the only one touched.
    pub fn with_settings(fs: F, settings: StoreSettings) -> Self {
        Self {
            fs,
            settings,
            active: None,
            log: &CONFIG_LOG,
            level_applied: false,
        }
    }

    /// Log to `log` instead of [`CONFIG_LOG`].
    pub fn with_log(mut self, log: &'static LogStream) -> Self {
        self.log = log;
        self.level_applied = false;
        self
    }

    fn apply_log_level(&mut self) {
        if !self.level_applied {
            self.log.set_level(self.settings.log_level);
            self.level_applied = true;
        }
    }

    /// Active config path, probing the candidates on first success.
    ///
    /// A miss is not cached; the next call probes again.
    pub fn config_file(&mut self) -> Option<&'static str> {
        self.apply_log_level();
        if self.active.is_none() {
            self.active = locator::locate(&mut self.fs, self.settings.candidates);
            match self.active {
                Some(path) => cfg_info!(self.log, "config: using {}", path),
                None => cfg_warn!(self.log, "config: no config file found"),
            }
        }
        self.active
    }

    /// Whether any candidate path holds a config file.
    pub fn has_config_file(&mut self) -> bool {
        self.config_file().is_some()
    }

    /// Look up a setting by hash.
    ///
    /// Never fails: a missing file, missing key or read error gives a record
    /// with `found == false`.
    pub fn value(&mut self, hash: u16) -> ConfigValue {
        self.apply_log_level();
        let Some(path) = self.config_file() else {
            cfg_debug!(self.log, "config: {} requested without config file", NameOf(hash));
            return ConfigValue::missing(hash);
        };

        let log = self.log;
        match self.fs.open(path, OpenMode::Read) {
            Ok(mut file) => reader::read_value(&mut file, hash, log),
            Err(_) => {
                cfg_warn!(log, "config: cannot open {}", path);
                ConfigValue::missing(hash)
            }
        }
    }

    /// Look up a setting by name.
    pub fn get(&mut self, name: &str) -> ConfigValue {
        self.value(name_hash(name))
    }

    /// Replace a setting's value in place.
    ///
    /// The value must be shorter than the existing value plus its trailing
    /// padding; otherwise the file is left untouched.
    pub fn set_string(&mut self, hash: u16, value: &str) -> Result<(), ConfigError> {
        self.apply_log_level();
        let result = self.write(hash, value);
        match result {
            Ok(()) => cfg_info!(self.log, "config: {} set to {}", NameOf(hash), value),
            Err(e) => cfg_warn!(self.log, "config: set {} failed: {}", NameOf(hash), e.message()),
        }
        result
    }

    fn write(&mut self, hash: u16, value: &str) -> Result<(), ConfigError> {
        writer::validate(value)?;
        let path = self.config_file().ok_or(ConfigError::NoConfigFile)?;

        let mut file = self
            .fs
            .open(path, OpenMode::ReadWrite)
            .map_err(|_| ConfigError::Io)?;
        writer::write_value(&mut file, hash, value, self.log)
    }

    /// Store settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Log stream the store writes to.
    pub fn log(&self) -> &'static LogStream {
        self.log
    }

    /// Underlying filesystem.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Underlying filesystem, mutably.
    pub fn filesystem_mut(&mut self) -> &mut F {
        &mut self.fs
    }
}

impl<F: Filesystem> Settings for Config<F> {
    fn value(&mut self, hash: u16) -> ConfigValue {
        Config::value(self, hash)
    }

    fn set_string(&mut self, hash: u16, value: &str) -> Result<(), ConfigError> {
        Config::set_string(self, hash, value)
    }
}
