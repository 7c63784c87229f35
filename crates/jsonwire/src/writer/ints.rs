//! Integer emission via the classic two-digits-per-iteration lookup table,
//! halving the divisions of a naive digit loop.

use crate::error::JsonWriterError;
use crate::writer::JsonWriter;

const fn build_digit_pairs() -> [u8; 200] {
    let mut t = [0u8; 200];
    let mut i = 0;
    while i < 100 {
        t[i * 2] = b'0' + (i / 10) as u8;
        t[i * 2 + 1] = b'0' + (i % 10) as u8;
        i += 1;
    }
    t
}

/// `"000102…9899"`.
static DIGIT_PAIRS: [u8; 200] = build_digit_pairs();

/// Writes `v` into the tail of `buf`, returning the index of the first
/// digit.
pub(crate) fn format_u64(mut v: u64, buf: &mut [u8; 20]) -> usize {
    let mut i = buf.len();
    while v >= 100 {
        let r = (v % 100) as usize;
        v /= 100;
        i -= 2;
        buf[i] = DIGIT_PAIRS[r * 2];
        buf[i + 1] = DIGIT_PAIRS[r * 2 + 1];
    }
    let r = v as usize;
    if v >= 10 {
        i -= 2;
        buf[i] = DIGIT_PAIRS[r * 2];
        buf[i + 1] = DIGIT_PAIRS[r * 2 + 1];
    } else {
        i -= 1;
        buf[i] = b'0' + r as u8;
    }
    i
}

macro_rules! signed_writers {
    ($($write:ident, $write_as_string:ident, $write_key:ident, $ty:ty;)*) => {$(
        /// Emits the decimal form of the value.
        pub fn $write(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put_signed_digits(i64::from(x))
        }

        /// Emits the value wrapped in double quotes.
        pub fn $write_as_string(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.put_signed_digits(i64::from(x))?;
            self.put(b'"')
        }

        /// Emits the value as a quoted object key followed by a colon.
        pub fn $write_key(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.put_signed_digits(i64::from(x))?;
            self.put(b'"')?;
            self.write_colon()
        }
    )*};
}

macro_rules! unsigned_writers {
    ($($write:ident, $write_as_string:ident, $write_key:ident, $ty:ty;)*) => {$(
        /// Emits the decimal form of the value.
        pub fn $write(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put_unsigned_digits(u64::from(x))
        }

        /// Emits the value wrapped in double quotes.
        pub fn $write_as_string(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.put_unsigned_digits(u64::from(x))?;
            self.put(b'"')
        }

        /// Emits the value as a quoted object key followed by a colon.
        pub fn $write_key(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.put_unsigned_digits(u64::from(x))?;
            self.put(b'"')?;
            self.write_colon()
        }
    )*};
}

impl JsonWriter<'_> {
    signed_writers! {
        write_i8, write_i8_as_string, write_key_as_i8, i8;
        write_i16, write_i16_as_string, write_key_as_i16, i16;
        write_i32, write_i32_as_string, write_key_as_i32, i32;
        write_i64, write_i64_as_string, write_key_as_i64, i64;
    }

    unsigned_writers! {
        write_u8, write_u8_as_string, write_key_as_u8, u8;
        write_u16, write_u16_as_string, write_key_as_u16, u16;
        write_u32, write_u32_as_string, write_key_as_u32, u32;
        write_u64, write_u64_as_string, write_key_as_u64, u64;
    }

    // --------------------------------------------------------------------
    // Arbitrary precision
    // --------------------------------------------------------------------

    /// Emits an arbitrary-precision integer as a plain JSON number.
    pub fn write_big_int(&mut self, x: &num_bigint::BigInt) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(x.to_string().as_bytes())
    }

    /// Emits the value wrapped in double quotes.
    pub fn write_big_int_as_string(
        &mut self,
        x: &num_bigint::BigInt,
    ) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_slice(x.to_string().as_bytes())?;
        self.put(b'"')
    }

    /// Emits the value as a quoted object key followed by a colon.
    pub fn write_key_as_big_int(&mut self, x: &num_bigint::BigInt) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_slice(x.to_string().as_bytes())?;
        self.put(b'"')?;
        self.write_colon()
    }

    /// Emits an arbitrary-precision decimal, preserving its scale: plain
    /// notation while the adjusted exponent stays in `[-6, ∞)` with a
    /// non-negative scale, scientific (`d.dddE±n`) otherwise.
    pub fn write_big_decimal(
        &mut self,
        x: &bigdecimal::BigDecimal,
    ) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_big_decimal(x)
    }

    /// Emits the value wrapped in double quotes.
    pub fn write_big_decimal_as_string(
        &mut self,
        x: &bigdecimal::BigDecimal,
    ) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_big_decimal(x)?;
        self.put(b'"')
    }

    /// Emits the value as a quoted object key followed by a colon.
    pub fn write_key_as_big_decimal(
        &mut self,
        x: &bigdecimal::BigDecimal,
    ) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_big_decimal(x)?;
        self.put(b'"')?;
        self.write_colon()
    }

    fn put_big_decimal(&mut self, x: &bigdecimal::BigDecimal) -> Result<(), JsonWriterError> {
        let (unscaled, scale) = x.as_bigint_and_exponent();
        if unscaled.sign() == num_bigint::Sign::Minus {
            self.put(b'-')?;
        }
        let coeff = unscaled.magnitude().to_string();
        if scale == 0 {
            return self.put_slice(coeff.as_bytes());
        }
        let adjusted = coeff.len() as i64 - 1 - scale;
        if scale > 0 && adjusted >= -6 {
            if scale >= coeff.len() as i64 {
                self.put_slice(b"0.")?;
                for _ in 0..scale - coeff.len() as i64 {
                    self.put(b'0')?;
                }
                self.put_slice(coeff.as_bytes())
            } else {
                let point = coeff.len() - scale as usize;
                self.put_slice(&coeff.as_bytes()[..point])?;
                self.put(b'.')?;
                self.put_slice(&coeff.as_bytes()[point..])
            }
        } else {
            let bytes = coeff.as_bytes();
            self.put(bytes[0])?;
            if bytes.len() > 1 {
                self.put(b'.')?;
                self.put_slice(&bytes[1..])?;
            }
            self.put(b'E')?;
            if adjusted >= 0 {
                self.put(b'+')?;
            }
            self.put_signed_digits(adjusted)
        }
    }

    pub(crate) fn put_signed_digits(&mut self, x: i64) -> Result<(), JsonWriterError> {
        if x < 0 {
            self.put(b'-')?;
        }
        self.put_unsigned_digits(x.unsigned_abs())
    }

    pub(crate) fn put_unsigned_digits(&mut self, x: u64) -> Result<(), JsonWriterError> {
        let mut digits = [0u8; 20];
        let from = format_u64(x, &mut digits);
        self.put_slice(&digits[from..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WriterConfig;

    fn emit(f: impl FnOnce(&mut JsonWriter<'_>)) -> String {
        let mut w = JsonWriter::to_vec(Vec::new(), WriterConfig::default());
        f(&mut w);
        String::from_utf8(w.into_vec()).unwrap()
    }

    #[test]
    fn extremes_round_trip_textually() {
        assert_eq!(emit(|w| w.write_i64(i64::MIN).unwrap()), "-9223372036854775808");
        assert_eq!(emit(|w| w.write_i64(i64::MAX).unwrap()), "9223372036854775807");
        assert_eq!(emit(|w| w.write_u64(u64::MAX).unwrap()), "18446744073709551615");
        assert_eq!(emit(|w| w.write_i8(-128).unwrap()), "-128");
        assert_eq!(emit(|w| w.write_i32(0).unwrap()), "0");
    }

    #[test]
    fn digit_pair_boundaries() {
        for x in [9u64, 10, 99, 100, 101, 999, 1000, 12345, 4_294_967_295] {
            assert_eq!(emit(|w| w.write_u64(x).unwrap()), x.to_string());
        }
    }

    #[test]
    fn stringified_and_key_forms() {
        assert_eq!(emit(|w| w.write_i32_as_string(-7).unwrap()), "\"-7\"");
        let out = emit(|w| {
            w.write_object_start().unwrap();
            w.write_key_as_i64(2).unwrap();
            w.write_bool(false).unwrap();
            w.write_object_end().unwrap();
        });
        assert_eq!(out, r#"{"2":false}"#);
    }
}
