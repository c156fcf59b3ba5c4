//! Config store error types

/// Config store error with code and message
///
/// Errors are reported on the serial channel as `ERROR: <message>` and the
/// operation returns; nothing unwinds past the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// E01: No candidate config path could be opened
    NoConfigFile,
    /// E02: Scan completed without a matching key
    KeyNotFound,
    /// E03: New value does not fit in the value span and its padding
    NotEnoughRoom,
    /// E04: Matching line has no value span to overwrite
    NoValue,
    /// E05: New value is empty or would break the line structure
    InvalidValue,
    /// E06: Missing required argument
    MissingArg,
    /// E07: Underlying read, seek or write failed
    Io,
    /// E08: Matching line is too long to locate its value
    LineTooLong,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoConfigFile => "E01",
            Self::KeyNotFound => "E02",
            Self::NotEnoughRoom => "E03",
            Self::NoValue => "E04",
            Self::InvalidValue => "E05",
            Self::MissingArg => "E06",
            Self::Io => "E07",
            Self::LineTooLong => "E08",
        }
    }

    /// Get error message, as printed after `ERROR: `
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoConfigFile => "no config file found",
            Self::KeyNotFound => "configuration key not found",
            Self::NotEnoughRoom => "Not enough room for value",
            Self::NoValue => "configuration key has no value to replace",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::Io => "storage I/O error",
            Self::LineTooLong => "configuration line too long",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ERROR: {}", self.message())
    }
}
