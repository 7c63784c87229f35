//! Integer parsers.
//!
//! Signed values accumulate in the negative space so `i64::MIN` parses
//! without overflow; unsigned values accumulate positively. Leading zeros
//! are rejected on multi-digit inputs, and a `.`/`e`/`E` after the digits
//! fails with `IllegalNumber` (integer readers do not accept fractional or
//! exponential forms).

use crate::error::{JsonReaderError, ReaderErrorKind};
use crate::reader::JsonReader;

macro_rules! signed_readers {
    ($($read:ident, $read_key:ident, $ty:ty, $name:literal;)*) => {$(
        /// Reads a JSON integer number.
        pub fn $read(&mut self) -> Result<$ty, JsonReaderError> {
            let b = self.next_token()?;
            let x = self.parse_signed(b, i64::from(<$ty>::MIN), $name)?;
            Ok(x as $ty)
        }

        /// Reads a quoted integer object key followed by a colon.
        pub fn $read_key(&mut self) -> Result<$ty, JsonReaderError> {
            self.next_token_expect_quote()?;
            let b = self.next_byte()?;
            let x = self.parse_signed(b, i64::from(<$ty>::MIN), $name)?;
            self.next_byte_expect_quote()?;
            self.read_colon()?;
            Ok(x as $ty)
        }
    )*};
}

macro_rules! unsigned_readers {
    ($($read:ident, $read_key:ident, $ty:ty, $name:literal;)*) => {$(
        /// Reads a JSON integer number.
        pub fn $read(&mut self) -> Result<$ty, JsonReaderError> {
            let b = self.next_token()?;
            let x = self.parse_unsigned(b, <$ty>::MAX as u64, $name)?;
            Ok(x as $ty)
        }

        /// Reads a quoted integer object key followed by a colon.
        pub fn $read_key(&mut self) -> Result<$ty, JsonReaderError> {
            self.next_token_expect_quote()?;
            let b = self.next_byte()?;
            let x = self.parse_unsigned(b, <$ty>::MAX as u64, $name)?;
            self.next_byte_expect_quote()?;
            self.read_colon()?;
            Ok(x as $ty)
        }
    )*};
}

impl JsonReader<'_> {
    signed_readers! {
        read_i8, read_key_as_i8, i8, "i8";
        read_i16, read_key_as_i16, i16, "i16";
        read_i32, read_key_as_i32, i32, "i32";
    }

    /// Reads a JSON integer number.
    pub fn read_i64(&mut self) -> Result<i64, JsonReaderError> {
        let b = self.next_token()?;
        self.parse_i64(b)
    }

    /// Reads a quoted integer object key followed by a colon.
    pub fn read_key_as_i64(&mut self) -> Result<i64, JsonReaderError> {
        self.next_token_expect_quote()?;
        let b = self.next_byte()?;
        let x = self.parse_i64(b)?;
        self.next_byte_expect_quote()?;
        self.read_colon()?;
        Ok(x)
    }

    unsigned_readers! {
        read_u8, read_key_as_u8, u8, "u8";
        read_u16, read_key_as_u16, u16, "u16";
        read_u32, read_key_as_u32, u32, "u32";
        read_u64, read_key_as_u64, u64, "u64";
    }

    /// Narrow signed parse; `min` is the type's lower bound widened to i64.
    fn parse_signed(
        &mut self,
        first: u8,
        min: i64,
        name: &'static str,
    ) -> Result<i64, JsonReaderError> {
        let mut b = first;
        let neg = b == b'-';
        if neg {
            b = self.next_byte()?;
        }
        if !b.is_ascii_digit() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNumber));
        }
        let mut x = -i64::from(b - b'0');
        let leading_zero = b == b'0';
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
            x = x * 10 - i64::from(d - b'0');
            if x < min {
                return Err(self.error_at(ReaderErrorKind::IntOverflow(name), pos));
            }
            pos += 1;
        }
        self.head = pos;
        if neg {
            Ok(x)
        } else if x == min {
            Err(self.error_at(ReaderErrorKind::IntOverflow(name), pos.saturating_sub(1)))
        } else {
            Ok(-x)
        }
    }

    /// Full-width signed parse with the wrapping overflow trick.
    fn parse_i64(&mut self, first: u8) -> Result<i64, JsonReaderError> {
        let mut b = first;
        let neg = b == b'-';
        if neg {
            b = self.next_byte()?;
        }
        if !b.is_ascii_digit() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNumber));
        }
        let mut x = -i64::from(b - b'0');
        let leading_zero = b == b'0';
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
            if x < i64::MIN / 10 {
                return Err(self.error_at(ReaderErrorKind::IntOverflow("i64"), pos));
            }
            x = x.wrapping_mul(10).wrapping_sub(i64::from(d - b'0'));
            if x > 0 {
                return Err(self.error_at(ReaderErrorKind::IntOverflow("i64"), pos));
            }
            pos += 1;
        }
        self.head = pos;
        if neg {
            Ok(x)
        } else if x == i64::MIN {
            Err(self.error_at(ReaderErrorKind::IntOverflow("i64"), pos.saturating_sub(1)))
        } else {
            Ok(-x)
        }
    }

    fn parse_unsigned(
        &mut self,
        first: u8,
        max: u64,
        name: &'static str,
    ) -> Result<u64, JsonReaderError> {
        let b = first;
        if !b.is_ascii_digit() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNumber));
        }
        let mut x = u64::from(b - b'0');
        let leading_zero = b == b'0';
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
            let d = u64::from(d - b'0');
            if x > (max - d) / 10 {
                return Err(self.error_at(ReaderErrorKind::IntOverflow(name), pos));
            }
            x = x * 10 + d;
            pos += 1;
        }
        self.head = pos;
        Ok(x)
    }
}
