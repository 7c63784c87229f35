//! Arbitrary-precision number parsers.
//!
//! Digits accumulate in the character-output buffer; conversion picks the
//! cheapest strategy for the digit count: direct 64-bit accumulation up to
//! 18 digits, a two-limb (128-bit) accumulator built from fixed 9-digit
//! chunks up to 36 digits, and a divide-and-conquer combine
//! (`left * 10^right_digits + right`) above that, which is O(n^1.5) instead
//! of the naive O(n^2).

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{JsonReaderError, ReaderErrorKind};
use crate::reader::JsonReader;

impl JsonReader<'_> {
    /// Reads a JSON integer number of unbounded magnitude, subject to
    /// [`ReaderConfig::big_int_digits_limit`](crate::ReaderConfig::big_int_digits_limit).
    pub fn read_big_int(&mut self) -> Result<BigInt, JsonReaderError> {
        let b = self.next_token()?;
        self.parse_big_int(b)
    }

    /// Reads a quoted big-integer object key followed by a colon.
    pub fn read_key_as_big_int(&mut self) -> Result<BigInt, JsonReaderError> {
        self.next_token_expect_quote()?;
        let b = self.next_byte()?;
        let x = self.parse_big_int(b)?;
        self.next_byte_expect_quote()?;
        self.read_colon()?;
        Ok(x)
    }

    /// Reads a JSON number as an arbitrary-precision decimal, subject to
    /// the digit and scale limits of the reader config.
    pub fn read_big_decimal(&mut self) -> Result<BigDecimal, JsonReaderError> {
        let b = self.next_token()?;
        self.parse_big_decimal(b)
    }

    /// Reads a quoted big-decimal object key followed by a colon.
    pub fn read_key_as_big_decimal(&mut self) -> Result<BigDecimal, JsonReaderError> {
        self.next_token_expect_quote()?;
        let b = self.next_byte()?;
        let x = self.parse_big_decimal(b)?;
        self.next_byte_expect_quote()?;
        self.read_colon()?;
        Ok(x)
    }

    fn parse_big_int(&mut self, first: u8) -> Result<BigInt, JsonReaderError> {
        let mut b = first;
        let neg = b == b'-';
        if neg {
            b = self.next_byte()?;
        }
        if !b.is_ascii_digit() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNumber));
        }
        let leading_zero = b == b'0';
        self.char_buf.clear();
        if b != b'0' {
            self.char_buf.push(b as char);
        }
        let digits_limit = self.config.big_int_digits_limit;
        let mut first_extra = true;
        let mut pos = self.head;
        loop {
            if pos >= self.tail {
                pos = self.load_more(pos)?;
                if pos >= self.tail {
                    break;
                }
            }
            let d = self.bytes()[pos];
            if !d.is_ascii_digit() {
                if matches!(d, b'.' | b'e' | b'E') {
                    return Err(self.error_at(ReaderErrorKind::IllegalNumber, pos));
                }
                break;
            }
            if leading_zero && first_extra {
                return Err(self.error_at(ReaderErrorKind::LeadingZero, pos.saturating_sub(1)));
            }
            first_extra = false;
            self.char_buf.push(d as char);
            if self.char_buf.len() > digits_limit {
                return Err(self.error_at(ReaderErrorKind::DigitsLimit, pos));
            }
            pos += 1;
        }
        self.head = pos;
        let magnitude = big_uint_from_digits(self.char_buf.as_bytes());
        Ok(match (neg, magnitude == BigUint::default()) {
            (_, true) => BigInt::default(),
            (true, false) => BigInt::from_biguint(Sign::Minus, magnitude),
            (false, false) => BigInt::from_biguint(Sign::Plus, magnitude),
        })
    }

    #[allow(clippy::too_many_lines)]
    fn parse_big_decimal(&mut self, first: u8) -> Result<BigDecimal, JsonReaderError> {
        let mut b = first;
        let neg = b == b'-';
        if neg {
            b = self.next_byte()?;
        }
        if !b.is_ascii_digit() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNumber));
        }
        let leading_zero = b == b'0';
        self.char_buf.clear();
        if b != b'0' {
            self.char_buf.push(b as char);
        }
        let digits_limit = self.config.big_decimal_digits_limit;
        let scale_limit = self.config.big_decimal_scale_limit as i64;
        let mut frac_len: i64 = 0;
        let mut pos = self.head;

        // Integer part.
        let mut first_extra = true;
        let mut at_end = false;
        loop {
            if pos >= self.tail {
                pos = self.load_more(pos)?;
                if pos >= self.tail {
                    at_end = true;
                    break;
                }
            }
            let d = self.bytes()[pos];
            if !d.is_ascii_digit() {
                break;
            }
            if leading_zero && first_extra {
                return Err(self.error_at(ReaderErrorKind::LeadingZero, pos.saturating_sub(1)));
            }
            first_extra = false;
            self.char_buf.push(d as char);
            if self.char_buf.len() > digits_limit {
                return Err(self.error_at(ReaderErrorKind::DigitsLimit, pos));
            }
            pos += 1;
        }

        // Fraction.
        if !at_end && self.bytes()[pos] == b'.' {
            pos += 1;
            let mut frac_digits = 0i64;
            loop {
                if pos >= self.tail {
                    pos = self.load_more(pos)?;
                    if pos >= self.tail {
                        at_end = true;
                        break;
                    }
                }
                let d = self.bytes()[pos];
                if !d.is_ascii_digit() {
                    break;
                }
                frac_digits += 1;
                if !(self.char_buf.is_empty() && d == b'0') {
                    self.char_buf.push(d as char);
                    if self.char_buf.len() > digits_limit {
                        return Err(self.error_at(ReaderErrorKind::DigitsLimit, pos));
                    }
                }
                if frac_digits > scale_limit + digits_limit as i64 {
                    return Err(self.error_at(ReaderErrorKind::ScaleLimit, pos));
                }
                pos += 1;
            }
            if frac_digits == 0 {
                return Err(self.error_at(ReaderErrorKind::IllegalNumber, pos.min(self.tail)));
            }
            frac_len = frac_digits;
        }

        // Exponent.
        let mut exp: i64 = 0;
        if !at_end && matches!(self.bytes()[pos], b'e' | b'E') {
            pos += 1;
            if pos >= self.tail {
                pos = self.load_more_or_error(pos)?;
            }
            let mut d = self.bytes()[pos];
            let exp_neg = d == b'-';
            if matches!(d, b'-' | b'+') {
                pos += 1;
                if pos >= self.tail {
                    pos = self.load_more_or_error(pos)?;
                }
                d = self.bytes()[pos];
            }
            if !d.is_ascii_digit() {
                return Err(self.error_at(ReaderErrorKind::IllegalNumber, pos));
            }
            loop {
                if !d.is_ascii_digit() {
                    break;
                }
                exp = (exp * 10 + i64::from(d - b'0')).min(1_000_000_000_000);
                pos += 1;
                if pos >= self.tail {
                    pos = self.load_more(pos)?;
                    if pos >= self.tail {
                        break;
                    }
                }
                d = self.bytes()[pos];
            }
            if exp_neg {
                exp = -exp;
            }
        }
        self.head = pos;

        let scale = frac_len - exp;
        if scale.unsigned_abs() > scale_limit as u64 {
            return Err(self.error_at_prev(ReaderErrorKind::ScaleLimit));
        }
        let magnitude = big_uint_from_digits(self.char_buf.as_bytes());
        let unscaled = match (neg, magnitude == BigUint::default()) {
            (_, true) => BigInt::default(),
            (true, false) => BigInt::from_biguint(Sign::Minus, magnitude),
            (false, false) => BigInt::from_biguint(Sign::Plus, magnitude),
        };
        Ok(BigDecimal::new(unscaled, scale))
    }
}

/// Builds a magnitude from ASCII digits, picking the accumulation strategy
/// by length.
fn big_uint_from_digits(digits: &[u8]) -> BigUint {
    if digits.len() <= 18 {
        let mut x: u64 = 0;
        for &d in digits {
            x = x * 10 + u64::from(d - b'0');
        }
        BigUint::from(x)
    } else if digits.len() <= 36 {
        BigUint::from(two_limb_from_digits(digits))
    } else {
        let right_len = digits.len() >> 1;
        let (left, right) = digits.split_at(digits.len() - right_len);
        big_uint_from_digits(left) * BigUint::from(10u32).pow(right_len as u32)
            + big_uint_from_digits(right)
    }
}

/// 128-bit accumulation from fixed 9-digit chunks (19..=36 digits).
fn two_limb_from_digits(digits: &[u8]) -> u128 {
    let head_len = digits.len() % 9;
    let mut x: u128 = 0;
    let mut i = 0;
    if head_len > 0 {
        let mut chunk: u64 = 0;
        for &d in &digits[..head_len] {
            chunk = chunk * 10 + u64::from(d - b'0');
        }
        x = u128::from(chunk);
        i = head_len;
    }
    while i < digits.len() {
        let mut chunk: u64 = 0;
        for &d in &digits[i..i + 9] {
            chunk = chunk * 10 + u64::from(d - b'0');
        }
        x = x * 1_000_000_000 + u128::from(chunk);
        i += 9;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_accumulation_strategies_agree() {
        let cases: &[&[u8]] = &[
            b"0",
            b"999999999999999999",
            b"1000000000000000000",
            b"123456789012345678901234567890123456",
            b"1234567890123456789012345678901234567",
            b"98765432109876543210987654321098765432109876543210",
        ];
        for digits in cases {
            let want: BigUint = std::str::from_utf8(digits).unwrap().parse().unwrap();
            assert_eq!(big_uint_from_digits(digits), want);
        }
    }

    #[test]
    fn two_limb_handles_chunk_boundaries() {
        for len in 19..=36 {
            let digits: Vec<u8> = (0..len).map(|i| b'1' + (i % 9) as u8).collect();
            let want: u128 = std::str::from_utf8(&digits).unwrap().parse().unwrap();
            assert_eq!(two_limb_from_digits(&digits), want);
        }
    }
}
