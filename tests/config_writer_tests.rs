//! In-place writer tests

use rust_motion_config::logging::{LogLevel, LogStream};
use rust_motion_config::{name_hash, Config, ConfigError, RamFs};

type Fs = RamFs<2, 512>;

const LOCAL: &str = "/local/config";

static LOG: LogStream = LogStream::new();

fn store(contents: &[u8]) -> Config<Fs> {
    let mut fs = Fs::new();
    fs.insert(LOCAL, contents).unwrap();
    Config::new(fs).with_log(&LOG)
}

fn file(config: &Config<Fs>) -> &[u8] {
    config.filesystem().contents(LOCAL).unwrap()
}

#[test]
fn test_set_same_length() {
    let mut config = store(b"foo 100 \n");

    assert_eq!(config.set_string(name_hash("foo"), "250"), Ok(()));
    assert_eq!(file(&config), b"foo 250 \n");
    assert_eq!(config.get("foo").as_str(), "250");
}

#[test]
fn test_set_shorter_value_is_padded() {
    let mut config = store(b"foo 1       \nbar 2\n");

    assert_eq!(config.set_string(name_hash("foo"), "1234567"), Ok(()));
    assert_eq!(file(&config), b"foo 1234567 \nbar 2\n");

    assert_eq!(config.set_string(name_hash("foo"), "9"), Ok(()));
    assert_eq!(file(&config), b"foo 9       \nbar 2\n");
    assert_eq!(config.get("foo").as_str(), "9");
}

#[test]
fn test_set_value_filling_span_is_refused() {
    let mut config = store(b"foo 1       \n");

    assert_eq!(
        config.set_string(name_hash("foo"), "12345678"),
        Err(ConfigError::NotEnoughRoom)
    );
    assert_eq!(file(&config), b"foo 1       \n");
    assert_eq!(config.get("foo").as_str(), "1");
}

#[test]
fn test_set_unknown_key() {
    let mut config = store(b"foo 1\n");

    assert_eq!(config.set_string(name_hash("bar"), "2"), Err(ConfigError::KeyNotFound));
    assert_eq!(file(&config), b"foo 1\n");
}

#[test]
fn test_set_keeps_surrounding_lines() {
    let mut config = store(b"# header\n\na 1 \nb 22\n");

    assert_eq!(config.set_string(name_hash("a"), "9"), Ok(()));
    assert_eq!(file(&config), b"# header\n\na 9 \nb 22\n");
}

#[test]
fn test_set_unpadded_value_is_refused() {
    // One byte of span and no padding: a one-byte value does not fit
    let mut config = store(b"# header\n\na 1\nb 22\n");

    assert_eq!(config.set_string(name_hash("a"), "9"), Err(ConfigError::NotEnoughRoom));
    assert_eq!(file(&config), b"# header\n\na 1\nb 22\n");
}

#[test]
fn test_set_keeps_trailing_comment() {
    let mut config = store(b"foo 1    # keep me\n");

    assert_eq!(config.set_string(name_hash("foo"), "123"), Ok(()));
    assert_eq!(file(&config), b"foo 123  # keep me\n");
    assert_eq!(config.get("foo").as_str(), "123");
}

#[test]
fn test_set_indented_line() {
    let mut config = store(b"   foo 1   \n");

    assert_eq!(config.set_string(name_hash("foo"), "22"), Ok(()));
    assert_eq!(file(&config), b"   foo 22  \n");
}

#[test]
fn test_set_crlf_file() {
    let mut config = store(b"foo 100\r\nbar 7\r\n");

    assert_eq!(config.set_string(name_hash("foo"), "42"), Ok(()));
    assert_eq!(file(&config), b"foo 42 \r\nbar 7\r\n");
    assert_eq!(config.get("bar").as_str(), "7");
}

#[test]
fn test_set_first_match_only() {
    let mut config = store(b"foo 1 \nfoo 2 \n");

    assert_eq!(config.set_string(name_hash("foo"), "9"), Ok(()));
    assert_eq!(file(&config), b"foo 9 \nfoo 2 \n");
}

#[test]
fn test_set_last_line_without_newline() {
    let mut config = store(b"a 1\nfoo 100");

    assert_eq!(config.set_string(name_hash("foo"), "7"), Ok(()));
    assert_eq!(file(&config), b"a 1\nfoo 7  ");
}

#[test]
fn test_set_key_without_value() {
    let mut config = store(b"foo       \nbar 1\n");

    assert_eq!(config.set_string(name_hash("foo"), "1"), Err(ConfigError::NoValue));
    assert_eq!(file(&config), b"foo       \nbar 1\n");
}

#[test]
fn test_set_rejects_unusable_values() {
    let mut config = store(b"foo 100000 \n");

    for bad in ["", " 1", "#1", "1\n2", "1\r", "a#b", "a b", "1 "] {
        assert_eq!(
            config.set_string(name_hash("foo"), bad),
            Err(ConfigError::InvalidValue),
            "value {:?} should be refused",
            bad
        );
    }
    assert_eq!(file(&config), b"foo 100000 \n");
}

#[test]
fn test_set_embedded_comment_refused_keeps_padding() {
    let mut config = store(b"foo 1         \n");

    assert_eq!(config.set_string(name_hash("foo"), "a#b"), Err(ConfigError::InvalidValue));
    assert_eq!(config.set_string(name_hash("foo"), "12"), Ok(()));
    assert_eq!(file(&config), b"foo 12        \n");
}

/// `<head><filler up to len - 1>\n`
fn long_line(head: &[u8], len: usize) -> Vec<u8> {
    let mut line = head.to_vec();
    line.resize(len - 1, b'x');
    line.push(b'\n');
    line
}

#[test]
fn test_set_overlong_line_with_comment() {
    let mut before = long_line(b"foo 1   # ", 150);
    before.extend_from_slice(b"foo 2\n");
    let mut config = store(&before);

    assert_eq!(config.set_string(name_hash("foo"), "42"), Ok(()));

    let mut expected = before.clone();
    expected[4..8].copy_from_slice(b"42  ");
    assert_eq!(file(&config), &expected[..]);
    assert_eq!(config.get("foo").as_str(), "42");
}

#[test]
fn test_set_overlong_value_is_refused() {
    let mut before = b"foo ".to_vec();
    before.extend_from_slice(&[b'9'; 200]);
    before.extend_from_slice(b"\nfoo 2 \n");
    let mut config = store(&before);

    assert_eq!(config.set_string(name_hash("foo"), "1"), Err(ConfigError::LineTooLong));
    assert_eq!(file(&config), &before[..]);
}

#[test]
fn test_set_without_config_file() {
    let mut config: Config<Fs> = Config::new(Fs::new()).with_log(&LOG);

    assert_eq!(config.set_string(name_hash("foo"), "1"), Err(ConfigError::NoConfigFile));
    assert_eq!(config.filesystem().contents(LOCAL), None);
}

#[test]
fn test_interrupted_write_only_touches_value() {
    let mut config = store(b"foo 100000\nbar 1\n");

    // Power lost after the value bytes, before the padding
    config.filesystem_mut().fail_writes_after(Some(2));
    assert_eq!(config.set_string(name_hash("foo"), "42"), Err(ConfigError::Io));

    assert_eq!(file(&config), b"foo 420000\nbar 1\n");
    assert_eq!(config.get("bar").as_str(), "1");
}

#[test]
fn test_failed_set_is_logged() {
    static SET_LOG: LogStream = LogStream::new();

    let mut fs = Fs::new();
    fs.insert(LOCAL, b"foo 1\n").unwrap();
    let mut config = Config::new(fs).with_log(&SET_LOG);
    while SET_LOG.drain().is_some() {}

    let _ = config.set_string(name_hash("foo"), "12");

    let mut warned = false;
    while let Some(entry) = SET_LOG.drain() {
        if entry.level == LogLevel::Warn && entry.message().contains("Not enough room") {
            warned = true;
        }
    }
    assert!(warned);
}
