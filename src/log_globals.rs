//! Global log stream instance.

use crate::logging::LogStream;

/// Default log stream for the config store and its command surface.
///
/// Producers run on the firmware event loop; the serial drain is the single
/// consumer.
pub static CONFIG_LOG: LogStream = LogStream::new();
