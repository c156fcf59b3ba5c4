//! Line buffer tests

use rust_motion_config::config::line_buffer::{LineBuffer, LineScanner, LINE_SIZE};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::new();

    for &b in b"a 1" {
        buf.push(b);
    }

    assert_eq!(buf.as_bytes(), b"a 1");
    assert_eq!(buf.len(), 3);
    assert!(!buf.overflowed());
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::new();

    buf.push(b'x');
    buf.clear();

    assert!(buf.is_empty());
    assert_eq!(buf.as_bytes(), b"");
}

#[test]
fn test_line_buffer_overflow() {
    let mut buf = LineBuffer::new();

    for _ in 0..LINE_SIZE + 10 {
        buf.push(b'a');
    }

    assert_eq!(buf.len(), LINE_SIZE);
    assert!(buf.overflowed());

    buf.clear();
    assert!(!buf.overflowed());
}

#[test]
fn test_scanner_counts_crlf_bytes() {
    let mut src: &[u8] = b"foo 1\r\nbar 2\r\n";
    let mut scanner = LineScanner::new();

    assert_eq!(scanner.next_line(&mut src).unwrap(), Some(0));
    assert_eq!(scanner.line().as_bytes(), b"foo 1\r");
    assert_eq!(scanner.next_line(&mut src).unwrap(), Some(7));
    assert_eq!(scanner.line().as_bytes(), b"bar 2\r");
    assert_eq!(scanner.next_line(&mut src).unwrap(), None);
}

#[test]
fn test_scanner_empty_file() {
    let mut src: &[u8] = b"";
    let mut scanner = LineScanner::new();

    assert_eq!(scanner.next_line(&mut src).unwrap(), None);
}
