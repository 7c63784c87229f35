//! Writer structure, pretty printing and the as-string emission forms.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{JsonWriter, WriterConfig};

fn emit(config: WriterConfig, f: impl FnOnce(&mut JsonWriter<'_>)) -> String {
    let mut w = JsonWriter::to_vec(Vec::new(), config);
    f(&mut w);
    String::from_utf8(w.into_vec()).unwrap()
}

#[test]
fn pretty_object_layout() {
    let out = emit(WriterConfig::default().with_indention_step(2), |w| {
        w.write_object_start().unwrap();
        w.write_key("a").unwrap();
        w.write_i32(1).unwrap();
        w.write_key("b").unwrap();
        w.write_object_start().unwrap();
        w.write_key("c").unwrap();
        w.write_array_start().unwrap();
        w.write_i32(2).unwrap();
        w.write_i32(3).unwrap();
        w.write_array_end().unwrap();
        w.write_object_end().unwrap();
        w.write_object_end().unwrap();
    });
    let expected = "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": [\n      2,\n      3\n    ]\n  }\n}";
    assert_eq!(out, expected);
}

#[test]
fn pretty_indention_step_width() {
    let out = emit(WriterConfig::default().with_indention_step(4), |w| {
        w.write_array_start().unwrap();
        w.write_i32(1).unwrap();
        w.write_array_end().unwrap();
    });
    assert_eq!(out, "[\n    1\n]");
}

#[test]
fn null_and_raw_interleave_commas() {
    let out = emit(WriterConfig::default(), |w| {
        w.write_array_start().unwrap();
        w.write_null().unwrap();
        w.write_raw_val(b"1e3").unwrap();
        w.write_null().unwrap();
        w.write_array_end().unwrap();
    });
    assert_eq!(out, "[null,1e3,null]");
}

#[test]
fn keys_of_every_flavor() {
    let out = emit(WriterConfig::default(), |w| {
        w.write_object_start().unwrap();
        w.write_key("s").unwrap();
        w.write_i32(1).unwrap();
        w.write_non_escaped_ascii_key("plain").unwrap();
        w.write_i32(2).unwrap();
        w.write_key_as_u32(7).unwrap();
        w.write_i32(3).unwrap();
        w.write_key_as_boolean(true).unwrap();
        w.write_i32(4).unwrap();
        w.write_key_as_f64(1.5).unwrap();
        w.write_i32(5).unwrap();
        w.write_object_end().unwrap();
    });
    assert_eq!(
        out,
        r#"{"s":1,"plain":2,"7":3,"true":4,"1.5":5}"#
    );
}

#[test]
fn escaped_keys() {
    let out = emit(WriterConfig::default(), |w| {
        w.write_object_start().unwrap();
        w.write_key("a\"b\n").unwrap();
        w.write_null().unwrap();
        w.write_object_end().unwrap();
    });
    assert_eq!(out, "{\"a\\\"b\\n\":null}");
}

#[test]
fn big_number_layouts() {
    let emit_dec = |s: &str| {
        let x: BigDecimal = s.parse().unwrap();
        emit(WriterConfig::default(), |w| w.write_big_decimal(&x).unwrap())
    };
    assert_eq!(emit_dec("0"), "0");
    assert_eq!(emit_dec("1.10"), "1.10");
    assert_eq!(emit_dec("0.003"), "0.003");
    assert_eq!(emit_dec("-12.345"), "-12.345");

    let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
    assert_eq!(
        emit(WriterConfig::default(), |w| w.write_big_int(&big).unwrap()),
        "-123456789012345678901234567890"
    );
    assert_eq!(
        emit(WriterConfig::default(), |w| w
            .write_big_int_as_string(&big)
            .unwrap()),
        "\"-123456789012345678901234567890\""
    );
}

#[test]
fn big_decimal_scientific_layout() {
    let cases: &[(&str, i64, &str)] = &[
        // (unscaled, scale, expected)
        ("1", -2, "1E+2"),
        ("123", -1, "1.23E+3"),
        ("1", 10, "1E-10"),
        ("12345", 2, "123.45"),
        ("1", 7, "1E-7"),
        ("12", 8, "1.2E-7"),
    ];
    for (unscaled, scale, want) in cases {
        let x = BigDecimal::new(unscaled.parse().unwrap(), *scale);
        assert_eq!(
            emit(WriterConfig::default(), |w| w.write_big_decimal(&x).unwrap()),
            *want,
            "unscaled {unscaled} scale {scale}"
        );
    }
}

#[test]
fn stringified_floats() {
    assert_eq!(
        emit(WriterConfig::default(), |w| w.write_f64_as_string(7.1e10).unwrap()),
        "\"7.1E10\""
    );
    assert_eq!(
        emit(WriterConfig::default(), |w| w.write_f32_as_string(0.5).unwrap()),
        "\"0.5\""
    );
}
