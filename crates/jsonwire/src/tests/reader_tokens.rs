//! Token operations, marks, structural skip and refill behavior.

use std::io::Cursor;

use crate::{JsonReader, ReaderConfig, ReaderErrorKind};

fn reader(input: &[u8]) -> JsonReader<'_> {
    JsonReader::from_slice(input, String::new(), ReaderConfig::default())
}

fn small_buf_config() -> ReaderConfig {
    let mut config = ReaderConfig::default();
    config.preferred_buf_size = 4;
    config
}

#[test]
fn token_walk() {
    let mut r = reader(b" \t\r\n {\"a\" : 1}");
    assert_eq!(r.next_token().unwrap(), b'{');
    assert!(r.is_current_token(b'{').unwrap());
    assert!(r.is_next_token(b'"').unwrap());
    r.rollback_token().unwrap();
    assert_eq!(r.next_byte().unwrap(), b'"');
}

#[test]
fn illegal_state_reports() {
    let mut r = reader(b"1");
    assert!(matches!(
        r.is_current_token(b'1').unwrap_err().kind(),
        ReaderErrorKind::IllegalState(_)
    ));
    assert!(matches!(
        r.rollback_token().unwrap_err().kind(),
        ReaderErrorKind::IllegalState(_)
    ));
    r.set_mark().unwrap();
    assert!(matches!(
        r.set_mark().unwrap_err().kind(),
        ReaderErrorKind::IllegalState(_)
    ));
    r.reset_mark().unwrap();
    assert!(matches!(
        r.reset_mark().unwrap_err().kind(),
        ReaderErrorKind::IllegalState(_)
    ));
}

#[test]
fn mark_rollback_restores_position() {
    let mut r = reader(b"abcdef");
    assert_eq!(r.next_byte().unwrap(), b'a');
    r.set_mark().unwrap();
    assert_eq!(r.next_byte().unwrap(), b'b');
    assert_eq!(r.next_byte().unwrap(), b'c');
    r.rollback_to_mark().unwrap();
    assert_eq!(r.next_byte().unwrap(), b'b');
}

#[test]
fn mark_survives_stream_refills() {
    let payload: Vec<u8> = (0..200u8).map(|i| b'0' + i % 10).collect();
    let mut src = Cursor::new(payload.clone());
    let mut r = JsonReader::from_stream(&mut src, Vec::new(), String::new(), small_buf_config());
    assert_eq!(r.next_byte().unwrap(), payload[0]);
    r.set_mark().unwrap();
    for i in 1..150 {
        assert_eq!(r.next_byte().unwrap(), payload[i]);
    }
    r.rollback_to_mark().unwrap();
    assert_eq!(r.next_byte().unwrap(), payload[1]);
}

#[test]
fn marked_input_larger_than_max_buf_fails() {
    let payload = vec![b'x'; 64];
    let mut src = Cursor::new(payload);
    let mut config = small_buf_config();
    config.max_buf_size = 8;
    let mut r = JsonReader::from_stream(&mut src, Vec::new(), String::new(), config);
    r.set_mark().unwrap();
    let mut last = Ok(0);
    for _ in 0..64 {
        last = r.next_byte();
        if last.is_err() {
            break;
        }
    }
    assert_eq!(last.unwrap_err().kind(), &ReaderErrorKind::TooLongInput);
}

#[test]
fn skip_stops_one_past_each_value() {
    let cases: &[(&[u8], &[u8])] = &[
        (b"null,", b","),
        (b"true ,", b" ,"),
        (b"false]", b"]"),
        (b"-12.5e+3}", b"}"),
        (b"\"a\\\"b\\\\\" :", b" :"),
        (br#"{"a":[1,{"b":"]"}]} tail"#, b" tail"),
        (br#"[[],[[]],"[\"]"] tail"#, b" tail"),
    ];
    for (input, rest) in cases {
        let mut r = reader(input);
        r.skip().unwrap();
        let mut remaining = Vec::new();
        while let Ok(b) = r.next_byte() {
            remaining.push(b);
        }
        assert_eq!(&remaining, rest, "input: {}", String::from_utf8_lossy(input));
    }
}

#[test]
fn raw_value_excludes_leading_whitespace_only() {
    let mut r = reader(b"  [1, \"x\" ]  ");
    let raw = r.read_raw_val_as_bytes().unwrap();
    assert_eq!(raw, b"[1, \"x\" ]");
}

#[test]
fn raw_value_across_stream_refills() {
    let doc = br#"{"k": [1, 2, 3, 4, 5, 6, 7, 8]}"#;
    let mut src = Cursor::new(doc.to_vec());
    let mut r = JsonReader::from_stream(&mut src, Vec::new(), String::new(), small_buf_config());
    let raw = r.read_raw_val_as_bytes().unwrap();
    assert_eq!(raw, &doc[..]);
}

#[test]
fn skip_to_key_positions_after_colon() {
    let mut r = reader(br#"{"a":1,"b":{"c":2},"d":3}"#);
    assert!(r.is_next_token(b'{').unwrap());
    assert!(r.skip_to_key("d").unwrap());
    assert_eq!(r.read_i64().unwrap(), 3);

    let mut r = reader(br#"{"a":1}"#);
    assert!(r.is_next_token(b'{').unwrap());
    assert!(!r.skip_to_key("zz").unwrap());
    // The closing brace was consumed.
    assert!(r.is_current_token(b'}').unwrap());
}

#[test]
fn unexpected_end_of_input() {
    let mut r = reader(b"tru");
    assert_eq!(
        r.read_boolean().unwrap_err().kind(),
        &ReaderErrorKind::UnexpectedEndOfInput
    );
}

#[test]
fn null_helpers() {
    let mut r = reader(b"null");
    assert!(r.is_next_token(b'n').unwrap());
    assert_eq!(r.read_null_or_error(42, "expected value").unwrap(), 42);

    let mut r = reader(b"nope");
    assert!(r.is_next_token(b'n').unwrap());
    assert!(r.read_null_or_error(42, "expected value").is_err());

    let mut r = reader(b"null");
    r.next_token().unwrap();
    assert_eq!(r.read_null_or_token_error(7, b'[').unwrap(), 7);
}

#[test]
fn error_offset_and_hex_dump() {
    let mut r = reader(br#"[true,nul]"#);
    let err = {
        r.next_token().unwrap();
        r.skip().unwrap();
        r.next_token().unwrap();
        r.read_boolean().unwrap_err()
    };
    let msg = err.to_string();
    assert!(msg.contains("offset: 0x"), "{msg}");
    assert!(msg.contains("| 00000000 |"), "{msg}");
    assert!(
        msg.contains("|  0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f |"),
        "{msg}"
    );
}

#[test]
fn codec_error_helpers_carry_names_and_offsets() {
    let mut r = reader(br#"{"id":1,"id":2}"#);
    assert!(r.is_next_token(b'{').unwrap());
    assert_eq!(r.read_key().unwrap(), "id");
    r.skip().unwrap();
    assert!(r.is_next_token(b',').unwrap());
    let key = r.read_key().unwrap();
    let err = r.duplicated_key_error(&key);
    assert_eq!(err.kind(), &ReaderErrorKind::DuplicatedKey("id".into()));
    assert!(err.to_string().starts_with("duplicated field \"id\""));

    let err = r.required_field_error("name");
    assert_eq!(
        err.kind(),
        &ReaderErrorKind::RequiredFieldMissing("name".into())
    );
    let err = r.discriminator_value_error("Circle");
    assert_eq!(
        err.kind(),
        &ReaderErrorKind::DiscriminatorValueError("Circle".into())
    );
}

#[test]
fn hex_dump_can_be_disabled() {
    let mut config = ReaderConfig::default();
    config.append_hex_dump_to_parse_exception = false;
    let mut r = JsonReader::from_slice(b"x", String::new(), config);
    let err = r.read_boolean().unwrap_err();
    assert!(!err.to_string().contains("buf:"));
    assert!(err.to_string().contains("offset: 0x00000000"));
}
