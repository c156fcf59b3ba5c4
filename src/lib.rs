//! # RustMotionConfig
//!
//! Configuration store for motion-control firmware.
//!
//! ## Architecture
//!
//! Settings live as `<key> <value>` text lines in a flat file on flash or SD
//! card, and are addressed by a 16-bit hash of the key:
//! - [`hash`] turns names into ids; `build.rs` bakes known names into
//!   constants
//! - [`config`] finds the file, looks values up and rewrites them in place,
//!   never changing the file length
//! - [`console`] serves `config-get`, `config-set` and `config-load`
//! - [`storage`] abstracts the filesystem; handles close on drop
//!
//! No heap allocation in the store: line buffers and values are fixed size.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod logging;
pub mod log_globals;
pub mod hash;
pub mod error;
pub mod storage;
pub mod config;
pub mod events;
pub mod console;

pub use config::{Config, ConfigValue, Settings, StoreSettings};
pub use console::{ConfigCommands, Dispatch};
pub use error::ConfigError;
pub use events::{Event, EventKind, EventSink};
pub use hash::{name_hash, names};
pub use log_globals::CONFIG_LOG;
pub use storage::{Filesystem, OpenMode, RamFs};
