//! End-to-end scenarios pinning exact bytes, bit patterns and error kinds.

use chrono::TimeDelta;

use crate::tests::utils::{F64Codec, I64Codec, NestedMapsCodec};
use crate::{
    read_from_slice, write_to_vec, JsonReader, ReaderConfig, ReaderErrorKind, WriterConfig,
};

fn reader(input: &[u8]) -> JsonReader<'_> {
    JsonReader::from_slice(input, String::new(), ReaderConfig::default())
}

#[test]
fn nested_maps_decode_and_reencode_exactly() {
    let input = br#"{"m":{"1":1.1,"2":2.2},"mm":{"1":{"3":3.3},"2":{}}}"#;
    let maps = read_from_slice(&NestedMapsCodec, input, ReaderConfig::default()).unwrap();
    assert_eq!(maps.m.len(), 2);
    assert_eq!(maps.m["1"], 1.1);
    assert_eq!(maps.m["2"], 2.2);
    assert_eq!(maps.mm.len(), 2);
    assert_eq!(maps.mm[&1][&3], 3.3);
    assert!(maps.mm[&2].is_empty());
    let bytes = write_to_vec(&NestedMapsCodec, &maps, WriterConfig::default()).unwrap();
    assert_eq!(bytes, input);
}

#[test]
fn double_7_1e10_round_trips_textually() {
    let x = read_from_slice(&F64Codec, b"7.1E10", ReaderConfig::default()).unwrap();
    assert_eq!(x.to_bits(), 7.1e10f64.to_bits());
    let bytes = write_to_vec(&F64Codec, &x, WriterConfig::default()).unwrap();
    assert_eq!(bytes, b"7.1E10");
}

#[test]
fn instant_one_second_before_epoch() {
    let mut r = reader(b"\"1969-12-31T23:59:59Z\"");
    let instant = r.read_instant().unwrap();
    assert_eq!(instant.timestamp(), -1);
    assert_eq!(instant.timestamp_subsec_nanos(), 0);
    let mut w = crate::JsonWriter::to_vec(Vec::new(), WriterConfig::default());
    w.write_instant(instant).unwrap();
    assert_eq!(w.into_vec(), b"\"1969-12-31T23:59:59Z\"");
}

#[test]
fn duration_with_negative_fraction() {
    let mut r = reader(b"\"PT-1M-0.000000001S\"");
    let d = r.read_duration().unwrap();
    assert_eq!(d, TimeDelta::new(-61, 999_999_999).unwrap());
    let mut w = crate::JsonWriter::to_vec(Vec::new(), WriterConfig::default());
    w.write_duration(d).unwrap();
    assert_eq!(w.into_vec(), b"\"PT-1M-0.000000001S\"");
}

#[test]
fn nineteen_nines_overflow_i64_at_last_digit() {
    let input = b"9999999999999999999";
    let err = read_from_slice(&I64Codec, input, ReaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), &ReaderErrorKind::IntOverflow("i64"));
    assert_eq!(err.offset(), input.len() as u64 - 1);
}

#[test]
fn escape_unicode_modes() {
    let s = "ї\u{8}c\u{0}";
    let mut w = crate::JsonWriter::to_vec(Vec::new(), WriterConfig::default());
    w.write_string(s).unwrap();
    assert_eq!(w.into_vec(), "\"ї\\bc\\u0000\"".as_bytes());

    let mut w = crate::JsonWriter::to_vec(
        Vec::new(),
        WriterConfig::default().with_escape_unicode(true),
    );
    w.write_string(s).unwrap();
    assert_eq!(w.into_vec(), b"\"\\u0457\\bc\\u0000\"");
}

#[test]
fn pretty_array_with_mixed_emission_forms() {
    let mut w = crate::JsonWriter::to_vec(
        Vec::new(),
        WriterConfig::default().with_indention_step(2),
    );
    w.write_array_start().unwrap();
    w.write_i32(1).unwrap();
    w.write_string("VVV").unwrap();
    w.write_non_escaped_ascii_val("WWW").unwrap();
    w.write_i64_as_string(2).unwrap();
    w.write_bool_as_string(true).unwrap();
    w.write_raw_val(b"3").unwrap();
    w.write_array_end().unwrap();
    let expected = "[\n  1,\n  \"VVV\",\n  \"WWW\",\n  \"2\",\n  \"true\",\n  3\n]";
    assert_eq!(String::from_utf8(w.into_vec()).unwrap(), expected);
}
