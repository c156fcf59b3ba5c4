//! Value record returned by lookups

use heapless::String;

use super::line_buffer::LINE_SIZE;

/// Result of a lookup by hash
///
/// `key` and `value` are empty when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    /// Hash the lookup was issued for
    pub hash: u16,
    /// Name as written on the matching line
    pub key: String<LINE_SIZE>,
    /// Value without padding or comment
    pub value: String<LINE_SIZE>,
    /// Whether a matching line was found
    pub found: bool,
}

impl ConfigValue {
    /// Record for a lookup that matched nothing
    pub fn missing(hash: u16) -> Self {
        Self {
            hash,
            key: String::new(),
            value: String::new(),
            found: false,
        }
    }

    /// Record for a matching line. Text is cut at the first byte that is not UTF-8.
    pub(crate) fn from_line(hash: u16, key: &[u8], value: &[u8]) -> Self {
        Self {
            hash,
            key: to_string(key),
            value: to_string(value),
            found: true,
        }
    }

    /// Value text
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Value text, or `default` when not found or empty
    pub fn by_default<'a>(&'a self, default: &'a str) -> &'a str {
        if self.found && !self.value.is_empty() {
            &self.value
        } else {
            default
        }
    }

    /// Value as a number
    pub fn as_number(&self) -> Option<f32> {
        if !self.found {
            return None;
        }
        self.value.parse().ok()
    }

    /// Value as a boolean (`true/1/on/yes`, `false/0/off/no`)
    pub fn as_bool(&self) -> Option<bool> {
        if !self.found {
            return None;
        }
        match self.value.as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => None,
        }
    }
}

fn to_string(bytes: &[u8]) -> String<LINE_SIZE> {
    let mut out = String::new();
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    };
    // Inputs come from a LINE_SIZE buffer, so this cannot overflow
    let _ = out.push_str(text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record() {
        let v = ConfigValue::missing(0xAF96);
        assert!(!v.found);
        assert_eq!(v.hash, 0xAF96);
        assert_eq!(v.as_str(), "");
        assert_eq!(v.by_default("42"), "42");
        assert_eq!(v.as_number(), None);
        assert_eq!(v.as_bool(), None);
    }

    #[test]
    fn test_found_record_conversions() {
        let v = ConfigValue::from_line(1, b"planner.acceleration", b"3000.5");
        assert_eq!(v.key.as_str(), "planner.acceleration");
        assert_eq!(v.by_default("100"), "3000.5");
        assert_eq!(v.as_number(), Some(3000.5));

        let b = ConfigValue::from_line(2, b"laser.enable", b"on");
        assert_eq!(b.as_bool(), Some(true));
        assert_eq!(b.as_number(), None);
    }

    #[test]
    fn test_empty_value_uses_default() {
        let v = ConfigValue::from_line(3, b"foo", b"");
        assert!(v.found);
        assert_eq!(v.by_default("7"), "7");
    }

    #[test]
    fn test_invalid_utf8_truncated() {
        let v = ConfigValue::from_line(4, b"foo", b"ab\xffcd");
        assert_eq!(v.as_str(), "ab");
    }
}
