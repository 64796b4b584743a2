use std::io::Cursor;

use super::*;

#[test]
fn reads_until_exhausted() {
    let mut src = ReaderByteSource::new(Cursor::new(b"hello".to_vec()));
    assert_eq!(src.status(), SourceStatus::NotOpen);
    src.open().unwrap();
    assert!(src.has_bytes_available());

    let mut buf = [0u8; 3];
    assert_eq!(src.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf, b"hel");
    assert_eq!(src.read(&mut buf).unwrap(), 2);
    assert_eq!(src.read(&mut buf).unwrap(), 0);
    assert_eq!(src.status(), SourceStatus::Exhausted);
    assert!(!src.has_bytes_available());
}

#[test]
fn close_then_read_is_an_error() {
    let mut src = ReaderByteSource::new(Cursor::new(b"x".to_vec()));
    src.open().unwrap();
    src.close().unwrap();
    assert_eq!(src.status(), SourceStatus::Closed);
    let mut buf = [0u8; 1];
    assert!(src.read(&mut buf).is_err());
}
