//! Integer, float and arbitrary-precision number parsing.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{JsonReader, ReaderConfig, ReaderErrorKind};

fn reader(input: &[u8]) -> JsonReader<'_> {
    JsonReader::from_slice(input, String::new(), ReaderConfig::default())
}

#[test]
fn integer_extremes() {
    assert_eq!(reader(b"0").read_i64().unwrap(), 0);
    assert_eq!(reader(b"-0").read_i64().unwrap(), 0);
    assert_eq!(
        reader(b"-9223372036854775808").read_i64().unwrap(),
        i64::MIN
    );
    assert_eq!(reader(b"9223372036854775807").read_i64().unwrap(), i64::MAX);
    assert_eq!(reader(b"-128").read_i8().unwrap(), i8::MIN);
    assert_eq!(reader(b"127").read_i8().unwrap(), i8::MAX);
    assert_eq!(reader(b"65535").read_u16().unwrap(), u16::MAX);
    assert_eq!(
        reader(b"18446744073709551615").read_u64().unwrap(),
        u64::MAX
    );
}

#[test]
fn integer_overflow_kinds() {
    assert_eq!(
        reader(b"-9223372036854775809").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("i64")
    );
    assert_eq!(
        reader(b"9223372036854775808").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("i64")
    );
    assert_eq!(
        reader(b"128").read_i8().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("i8")
    );
    assert_eq!(
        reader(b"-129").read_i8().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("i8")
    );
    assert_eq!(
        reader(b"18446744073709551616").read_u64().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("u64")
    );
    assert_eq!(
        reader(b"256").read_u8().unwrap_err().kind(),
        &ReaderErrorKind::IntOverflow("u8")
    );
}

#[test]
fn integer_grammar_violations() {
    assert_eq!(
        reader(b"01").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::LeadingZero
    );
    assert_eq!(
        reader(b"-01").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::LeadingZero
    );
    assert_eq!(
        reader(b"1.5").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"1e3").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"-").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::UnexpectedEndOfInput
    );
    assert_eq!(
        reader(b"-x").read_i64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"-1").read_u32().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
}

#[test]
fn doubles_agree_with_std_parsing() {
    let literals: &[&str] = &[
        "0.0",
        "-0.0",
        "1.0",
        "7.1E10",
        "0.1",
        "0.3",
        "1e-3",
        "1E+3",
        "123456789.123456789",
        "1.7976931348623157e308",
        "2.2250738585072014e-308",
        "4.9e-324",
        "2.2250738585072011e-308",
        "1e999",
        "-1e999",
        "1e-999",
        "0.000000000000000000000000000000000000000000001",
        "9007199254740993",
        "922337203685477580700000000000000000000",
        "9999999999999999999999999999999999999999.9999999999e-10",
        "6.226662346353213e-309",
    ];
    for lit in literals {
        let got = reader(lit.as_bytes()).read_f64().unwrap();
        let want: f64 = lit.parse().unwrap();
        assert_eq!(got.to_bits(), want.to_bits(), "literal {lit}");
    }
}

#[test]
fn floats_are_single_rounded() {
    // Double rounding through f64 would miss these.
    let got = reader(b"7.038531e-26").read_f32().unwrap();
    let want: f32 = "7.038531e-26".parse().unwrap();
    assert_eq!(got.to_bits(), want.to_bits());

    for lit in ["0.1", "3.4028235e38", "3.4028236e38", "1e-45", "1.1754944e-38"] {
        let got = reader(lit.as_bytes()).read_f32().unwrap();
        let want: f32 = lit.parse().unwrap();
        assert_eq!(got.to_bits(), want.to_bits(), "literal {lit}");
    }
}

#[test]
fn float_grammar_violations() {
    assert_eq!(
        reader(b"1.").read_f64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"1.e3").read_f64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"1ex").read_f64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"00.5").read_f64().unwrap_err().kind(),
        &ReaderErrorKind::LeadingZero
    );
    assert_eq!(
        reader(b"+1").read_f64().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
}

#[test]
fn floats_terminate_at_structural_bytes() {
    let mut r = reader(b"[1.5,2.5e1]");
    assert!(r.is_next_token(b'[').unwrap());
    assert_eq!(r.read_f64().unwrap(), 1.5);
    assert!(r.is_next_token(b',').unwrap());
    assert_eq!(r.read_f64().unwrap(), 25.0);
    assert!(r.is_next_token(b']').unwrap());
}

#[test]
fn big_int_strategies() {
    let small = reader(b"123456789012345678").read_big_int().unwrap();
    assert_eq!(small, BigInt::from(123_456_789_012_345_678i64));

    let two_limb = reader(b"-123456789012345678901234567890123456")
        .read_big_int()
        .unwrap();
    assert_eq!(
        two_limb,
        "-123456789012345678901234567890123456".parse().unwrap()
    );

    let big = "9".repeat(100);
    let parsed = reader(big.as_bytes()).read_big_int().unwrap();
    assert_eq!(parsed, big.parse().unwrap());
}

#[test]
fn big_int_limits_and_grammar() {
    let over = "1".repeat(309);
    assert_eq!(
        reader(over.as_bytes()).read_big_int().unwrap_err().kind(),
        &ReaderErrorKind::DigitsLimit
    );
    assert_eq!(
        reader(b"1.5").read_big_int().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNumber
    );
    assert_eq!(
        reader(b"01").read_big_int().unwrap_err().kind(),
        &ReaderErrorKind::LeadingZero
    );
    let mut config = ReaderConfig::default();
    config.big_int_digits_limit = 4;
    let mut r = JsonReader::from_slice(b"12345", String::new(), config);
    assert_eq!(
        r.read_big_int().unwrap_err().kind(),
        &ReaderErrorKind::DigitsLimit
    );
}

#[test]
fn big_decimal_preserves_scale() {
    let cases: &[(&[u8], &str)] = &[
        (b"0", "0"),
        (b"0.00", "0.00"),
        (b"1.10", "1.10"),
        (b"-12.345", "-12.345"),
        (b"1e10", "1e10"),
        (b"1.5E-7", "1.5e-7"),
        (b"123456789012345678901234567890.5", "123456789012345678901234567890.5"),
    ];
    for (input, want) in cases {
        let got = reader(input).read_big_decimal().unwrap();
        let want: BigDecimal = want.parse().unwrap();
        assert_eq!(got, want, "input {}", String::from_utf8_lossy(input));
    }
}

#[test]
fn big_decimal_scale_limit() {
    assert_eq!(
        reader(b"1e10000").read_big_decimal().unwrap_err().kind(),
        &ReaderErrorKind::ScaleLimit
    );
    assert_eq!(
        reader(b"1e-10000").read_big_decimal().unwrap_err().kind(),
        &ReaderErrorKind::ScaleLimit
    );
    // The default limit admits the extremes the config promises.
    assert!(reader(b"1e6178").read_big_decimal().is_ok());
    assert!(reader(b"1e-6178").read_big_decimal().is_ok());
}

#[test]
fn numbers_cross_checked_against_serde_json() {
    let docs: &[&str] = &["7.1e10", "-2.5", "1e-7", "42.0", "123456.789"];
    for doc in docs {
        let ours = reader(doc.as_bytes()).read_f64().unwrap();
        let theirs: serde_json::Value = serde_json::from_str(doc).unwrap();
        assert_eq!(Some(ours), theirs.as_f64(), "doc {doc}");
    }
}
