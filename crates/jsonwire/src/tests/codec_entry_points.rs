//! The top-level entry points and their carrier behavior.

use std::io::Cursor;

use bytes::{Bytes, BytesMut};

use crate::tests::utils::{I64Codec, NestedMapsCodec, StringCodec};
use crate::{
    read_from_buf, read_from_slice, read_from_str, read_from_stream, scan_array_from_stream,
    scan_values_from_stream, write_to_buf, write_to_slice, write_to_stream, write_to_string,
    write_to_vec, JsonWriterError, ReaderConfig, ReaderErrorKind, WriterConfig,
};

#[test]
fn slice_and_str_carriers() {
    assert_eq!(
        read_from_slice(&I64Codec, b" 42 ", ReaderConfig::default()).unwrap(),
        42
    );
    assert_eq!(
        read_from_str(&StringCodec, "\"hi\"", ReaderConfig::default()).unwrap(),
        "hi"
    );
    assert_eq!(
        read_from_str(&StringCodec, "null", ReaderConfig::default()).unwrap(),
        ""
    );
}

#[test]
fn check_for_end_of_input_toggles() {
    let err = read_from_slice(&I64Codec, b"42 x", ReaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), &ReaderErrorKind::UnexpectedToken("end of input"));

    let lenient = ReaderConfig::default().with_check_for_end_of_input(false);
    assert_eq!(read_from_slice(&I64Codec, b"42 x", lenient).unwrap(), 42);
}

#[test]
fn bytes_carrier_advances_by_consumed() {
    let lenient = ReaderConfig::default().with_check_for_end_of_input(false);
    let mut buf = Bytes::from_static(b"17 remainder");
    assert_eq!(read_from_buf(&I64Codec, &mut buf, lenient).unwrap(), 17);
    assert_eq!(&buf[..], b" remainder");
}

#[test]
fn stream_carrier_with_tiny_buffer() {
    let doc = br#"{"m":{"1":1.1,"2":2.2},"mm":{"1":{"3":3.3},"2":{}}}"#;
    let mut config = ReaderConfig::default();
    config.preferred_buf_size = 4;
    let mut src = Cursor::new(doc.to_vec());
    let maps = read_from_stream(&NestedMapsCodec, &mut src, config).unwrap();
    assert_eq!(maps.m["2"], 2.2);
    let bytes = write_to_vec(&NestedMapsCodec, &maps, WriterConfig::default()).unwrap();
    assert_eq!(bytes, doc);
}

#[test]
fn scan_values() {
    let mut src = Cursor::new(b"1 2\n3\t4".to_vec());
    let mut seen = Vec::new();
    scan_values_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |v| {
        seen.push(v);
        true
    })
    .unwrap();
    assert_eq!(seen, vec![1, 2, 3, 4]);

    let mut src = Cursor::new(b"1 2 3".to_vec());
    let mut seen = Vec::new();
    scan_values_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |v| {
        seen.push(v);
        v < 2
    })
    .unwrap();
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn scan_array() {
    let mut src = Cursor::new(b" [1, 2, 3] ".to_vec());
    let mut seen = Vec::new();
    scan_array_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |v| {
        seen.push(v);
        true
    })
    .unwrap();
    assert_eq!(seen, vec![1, 2, 3]);

    // Early stop still verifies the closing bracket and end of input.
    let mut src = Cursor::new(b"[1, 2, 3] trailing".to_vec());
    let err = scan_array_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |_| false)
        .unwrap_err();
    assert_eq!(err.kind(), &ReaderErrorKind::UnexpectedToken("end of input"));

    let mut src = Cursor::new(b"[]".to_vec());
    scan_array_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |_| {
        panic!("no elements expected")
    })
    .unwrap();

    let mut src = Cursor::new(b"{}".to_vec());
    assert!(
        scan_array_from_stream(&I64Codec, &mut src, ReaderConfig::default(), |_| true).is_err()
    );
}

#[test]
fn write_carriers() {
    let value = 123_456i64;
    assert_eq!(
        write_to_vec(&I64Codec, &value, WriterConfig::default()).unwrap(),
        b"123456"
    );
    assert_eq!(
        write_to_string(&I64Codec, &value, WriterConfig::default()).unwrap(),
        "123456"
    );

    let mut target = [0u8; 16];
    let n = write_to_slice(&I64Codec, &value, &mut target, WriterConfig::default()).unwrap();
    assert_eq!(&target[..n], b"123456");

    let mut tiny = [0u8; 3];
    assert!(matches!(
        write_to_slice(&I64Codec, &value, &mut tiny, WriterConfig::default()),
        Err(JsonWriterError::TooLongOutput)
    ));

    let mut out = BytesMut::new();
    write_to_buf(&I64Codec, &value, &mut out, WriterConfig::default()).unwrap();
    assert_eq!(&out[..], b"123456");

    let mut sink = Vec::new();
    write_to_stream(&I64Codec, &value, &mut sink, WriterConfig::default()).unwrap();
    assert_eq!(sink, b"123456");
}

#[test]
fn stream_writer_flushes_on_overflow() {
    let mut config = WriterConfig::default();
    config.preferred_buf_size = 2;
    let long = "x".repeat(100);
    let mut sink = Vec::new();
    write_to_stream(&StringCodec, &long, &mut sink, config).unwrap();
    assert_eq!(sink, format!("\"{long}\"").into_bytes());
}

#[test]
fn entry_points_are_reusable_after_errors() {
    assert!(read_from_slice(&I64Codec, b"zzz", ReaderConfig::default()).is_err());
    assert_eq!(
        read_from_slice(&I64Codec, b"7", ReaderConfig::default()).unwrap(),
        7
    );
}
