//! Name hasher
//!
//! Settings and console verbs are addressed by a 16-bit digest of their name
//! instead of the name itself, so firmware only has to embed a `u16` per key.
//!
//! The digest is CRC-16/XMODEM (poly 0x1021, init 0, no reflection, no final
//! xor) over the raw name bytes. Offline tools that edit the config file or
//! emit firmware constants must use the same algorithm. Hashing is
//! case-sensitive and collisions resolve to the first matching line in the
//! file.

use crc::{Crc, CRC_16_XMODEM};

/// Fixed name hash algorithm. `build.rs` uses the same parameters.
const NAME_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Hash a setting or verb name.
///
/// # Example
///
/// ```
/// use rust_motion_config::hash::name_hash;
///
/// assert_eq!(name_hash("config-get"), 0x2832);
/// ```
pub fn name_hash(name: &str) -> u16 {
    hash_bytes(name.as_bytes())
}

/// Hash a raw key span, as found on a config line.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u16 {
    NAME_CRC.checksum(bytes)
}

/// Build-time constants for every name listed in `names.list`.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/known_names.rs"));
}

/// Resolve a hash back to its source name, if the name is listed in
/// `names.list`. Used to make collisions and log lines readable.
pub fn known_name(hash: u16) -> Option<&'static str> {
    names::KNOWN_NAMES
        .binary_search_by_key(&hash, |&(h, _)| h)
        .ok()
        .map(|idx| names::KNOWN_NAMES[idx].1)
}

/// Displays a hash as its known name, or as `0xABCD` when unlisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOf(pub u16);

impl core::fmt::Display for NameOf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match known_name(self.0) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}
