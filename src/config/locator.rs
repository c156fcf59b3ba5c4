//! Config file locator

use crate::storage::{Filesystem, OpenMode};

/// Default candidate paths, on-board flash first.
pub const DEFAULT_CANDIDATES: &[&str] = &["/local/config", "/sd/config"];

/// First candidate that opens for reading, in list order.
///
/// Each probe handle is dropped before the next candidate is tried.
pub fn locate<F: Filesystem>(fs: &mut F, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .copied()
        .find(|path| fs.open(path, OpenMode::Read).is_ok())
}
