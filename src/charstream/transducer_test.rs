use super::*;

fn decode_all(t: &mut Utf8Transducer, input: &[u8]) -> (Vec<char>, ConvertStatus) {
    let mut out = vec![0u8; 4096];
    let outcome = t.convert(input, &mut out);
    assert_eq!(outcome.bytes_consumed, input.len(), "test buffers are large enough to avoid OutputFull");
    let mut chars = Vec::new();
    for chunk in out[..outcome.bytes_produced].chunks_exact(4) {
        let cp = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        chars.push(char::from_u32(cp).unwrap());
    }
    (chars, outcome.status)
}

#[test]
fn rejects_unknown_encoding() {
    assert!(Utf8Transducer::try_new("shift-jis", TransducerOption::None).is_err());
}

#[test]
fn accepts_utf8_and_ascii_aliases() {
    assert!(Utf8Transducer::try_new("UTF-8", TransducerOption::None).is_ok());
    assert!(Utf8Transducer::try_new("ascii", TransducerOption::None).is_ok());
}

#[test]
fn decodes_ascii_and_multibyte() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::None).unwrap();
    let (chars, status) = decode_all(&mut t, "ab\u{00e9}\u{4e2d}".as_bytes());
    assert_eq!(status, ConvertStatus::Complete);
    assert_eq!(chars, vec!['a', 'b', '\u{00e9}', '\u{4e2d}']);
}

#[test]
fn reports_incomplete_trailing_sequence() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::None).unwrap();
    let mut bytes = "x".as_bytes().to_vec();
    bytes.push(0xE4); // first byte of a 3-byte sequence, chunk ends here
    let mut out = vec![0u8; 64];
    let outcome = t.convert(&bytes, &mut out);
    assert_eq!(outcome.status, ConvertStatus::IncompleteTrailing);
    assert_eq!(outcome.bytes_consumed, 1);
    assert_eq!(outcome.bytes_produced, 4);
}

#[test]
fn none_option_surfaces_invalid_sequence() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::None).unwrap();
    let bytes = [b'a', 0xFF, b'b'];
    let mut out = vec![0u8; 64];
    let outcome = t.convert(&bytes, &mut out);
    assert_eq!(outcome.status, ConvertStatus::InvalidSequence);
    assert_eq!(outcome.bytes_consumed, 1);
}

#[test]
fn ignore_invalid_skips_bad_bytes() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::IgnoreInvalid).unwrap();
    let bytes = [b'a', 0xFF, b'b'];
    let (chars, status) = decode_all(&mut t, &bytes);
    assert_eq!(status, ConvertStatus::Complete);
    assert_eq!(chars, vec!['a', 'b']);
}

#[test]
fn transliterate_replaces_bad_bytes_with_replacement_char() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::Transliterate).unwrap();
    let bytes = [b'a', 0xFF, b'b'];
    let (chars, status) = decode_all(&mut t, &bytes);
    assert_eq!(status, ConvertStatus::Complete);
    assert_eq!(chars, vec!['a', '\u{FFFD}', 'b']);
}

#[test]
fn output_full_stops_short_and_reports_partial_progress() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::None).unwrap();
    let mut out = vec![0u8; 4]; // room for exactly one code unit
    let outcome = t.convert(b"ab", &mut out);
    assert_eq!(outcome.status, ConvertStatus::OutputFull);
    assert_eq!(outcome.bytes_consumed, 1);
    assert_eq!(outcome.bytes_produced, 4);
}

#[test]
fn flush_is_a_no_op_for_stateless_utf8() {
    let mut t = Utf8Transducer::try_new("UTF-8", TransducerOption::None).unwrap();
    let mut out = vec![0u8; 16];
    let outcome = t.flush(&mut out);
    assert_eq!(outcome.status, FlushStatus::Complete);
    assert_eq!(outcome.bytes_produced, 0);
}
