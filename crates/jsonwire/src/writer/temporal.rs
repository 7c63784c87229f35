//! Fixed-grammar ISO-8601 formatters, matching the parsers in
//! [`crate::reader`] exactly so every emitted temporal value re-parses to
//! itself.
//!
//! Seconds are omitted when zero (except for instants, which always carry
//! them), and fractional seconds use the minimal width that preserves
//! exactness: 0, 3, 6 or 9 digits. Years outside `0..=9999` carry a sign
//! and extended digits.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};

use crate::error::JsonWriterError;
use crate::temporal::{MonthDay, OffsetTime, Period, YearMonth, ZoneId, ZonedDateTime};
use crate::writer::JsonWriter;

macro_rules! temporal_writers {
    ($($write:ident, $write_key:ident, $put:ident, $ty:ty;)*) => {$(
        /// Emits the quoted ISO-8601 form of this temporal value.
        pub fn $write(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.$put(x)?;
            self.put(b'"')
        }

        /// Emits this temporal value as an object key followed by a colon.
        pub fn $write_key(&mut self, x: $ty) -> Result<(), JsonWriterError> {
            self.write_comma_and_indention()?;
            self.put(b'"')?;
            self.$put(x)?;
            self.put(b'"')?;
            self.write_colon()
        }
    )*};
}

impl JsonWriter<'_> {
    temporal_writers! {
        write_duration, write_key_as_duration, put_duration, TimeDelta;
        write_instant, write_key_as_instant, put_instant, DateTime<Utc>;
        write_local_date, write_key_as_local_date, put_local_date, chrono::NaiveDate;
        write_local_date_time, write_key_as_local_date_time, put_local_date_time, NaiveDateTime;
        write_local_time, write_key_as_local_time, put_local_time, NaiveTime;
        write_month_day, write_key_as_month_day, put_month_day, MonthDay;
        write_offset_date_time, write_key_as_offset_date_time, put_offset_date_time,
            DateTime<FixedOffset>;
        write_offset_time, write_key_as_offset_time, put_offset_time, OffsetTime;
        write_period, write_key_as_period, put_period, Period;
        write_year, write_key_as_year, put_year_value, i32;
        write_year_month, write_key_as_year_month, put_year_month, YearMonth;
        write_zoned_date_time, write_key_as_zoned_date_time, put_zoned_date_time, ZonedDateTime;
        write_zone_id, write_key_as_zone_id, put_zone_id, ZoneId;
        write_zone_offset, write_key_as_zone_offset, put_zone_offset, FixedOffset;
    }

    /// Emits `epoch_second` plus `nano_of_second` as a plain (non-string)
    /// decimal with the shortest trailing-zero-trimmed fraction. Nanos
    /// outside `[0, 10^9)` fail with `IllegalNanoseconds`.
    pub fn write_timestamp(
        &mut self,
        epoch_second: i64,
        nano_of_second: i64,
    ) -> Result<(), JsonWriterError> {
        if !(0..1_000_000_000).contains(&nano_of_second) {
            return Err(JsonWriterError::IllegalNanoseconds(nano_of_second));
        }
        self.write_comma_and_indention()?;
        let total = i128::from(epoch_second) * 1_000_000_000 + i128::from(nano_of_second);
        if total < 0 {
            self.put(b'-')?;
        }
        let abs = total.unsigned_abs();
        self.put_unsigned_digits((abs / 1_000_000_000) as u64)?;
        let mut frac = (abs % 1_000_000_000) as u32;
        if frac != 0 {
            self.put(b'.')?;
            let mut width = 9;
            while frac % 10 == 0 {
                frac /= 10;
                width -= 1;
            }
            let mut digits = [b'0'; 9];
            let mut i = width;
            while frac > 0 {
                i -= 1;
                digits[i] = b'0' + (frac % 10) as u8;
                frac /= 10;
            }
            self.put_slice(&digits[..width])?;
        }
        Ok(())
    }

    // --------------------------------------------------------------------
    // Pieces
    // --------------------------------------------------------------------

    fn put_two(&mut self, v: u32) -> Result<(), JsonWriterError> {
        self.put_slice(&[b'0' + (v / 10) as u8, b'0' + (v % 10) as u8])
    }

    /// Four zero-padded digits for common years; a sign and extended
    /// digits outside `0..=9999`.
    fn put_year(&mut self, year: i32) -> Result<(), JsonWriterError> {
        if (0..=9999).contains(&year) {
            let y = year as u32;
            self.put_two(y / 100)?;
            return self.put_two(y % 100);
        }
        if year > 9999 {
            self.put(b'+')?;
        } else {
            self.put(b'-')?;
        }
        let abs = year.unsigned_abs();
        if abs < 1000 {
            // Negative years keep at least four digits, e.g. `-0005`.
            self.put_two(abs / 100)?;
            return self.put_two(abs % 100);
        }
        self.put_unsigned_digits(u64::from(abs))
    }

    fn put_date(&mut self, date: chrono::NaiveDate) -> Result<(), JsonWriterError> {
        self.put_year(date.year())?;
        self.put(b'-')?;
        self.put_two(date.month())?;
        self.put(b'-')?;
        self.put_two(date.day())
    }

    fn put_time(&mut self, time: NaiveTime, force_seconds: bool) -> Result<(), JsonWriterError> {
        self.put_two(time.hour())?;
        self.put(b':')?;
        self.put_two(time.minute())?;
        let second = time.second();
        let nano = time.nanosecond();
        if force_seconds || second != 0 || nano != 0 {
            self.put(b':')?;
            self.put_two(second)?;
            if nano != 0 {
                self.put_second_fraction(nano)?;
            }
        }
        Ok(())
    }

    /// The minimal exact fraction width: 3, 6 or 9 digits.
    fn put_second_fraction(&mut self, nano: u32) -> Result<(), JsonWriterError> {
        self.put(b'.')?;
        if nano % 1_000_000 == 0 {
            let millis = nano / 1_000_000;
            self.put(b'0' + (millis / 100) as u8)?;
            self.put_two(millis % 100)
        } else if nano % 1000 == 0 {
            let micros = nano / 1000;
            self.put_two(micros / 10_000)?;
            self.put_two(micros / 100 % 100)?;
            self.put_two(micros % 100)
        } else {
            self.put(b'0' + (nano / 100_000_000) as u8)?;
            self.put_two(nano / 1_000_000 % 100)?;
            self.put_two(nano / 10_000 % 100)?;
            self.put_two(nano / 100 % 100)?;
            self.put_two(nano % 100)
        }
    }

    fn put_offset(&mut self, offset: FixedOffset) -> Result<(), JsonWriterError> {
        let total = offset.local_minus_utc();
        if total == 0 {
            return self.put(b'Z');
        }
        self.put(if total < 0 { b'-' } else { b'+' })?;
        let abs = total.unsigned_abs();
        self.put_two(abs / 3600)?;
        self.put(b':')?;
        self.put_two(abs / 60 % 60)?;
        if abs % 60 != 0 {
            self.put(b':')?;
            self.put_two(abs % 60)?;
        }
        Ok(())
    }

    fn put_local_date(&mut self, date: chrono::NaiveDate) -> Result<(), JsonWriterError> {
        self.put_date(date)
    }

    fn put_local_time(&mut self, time: NaiveTime) -> Result<(), JsonWriterError> {
        self.put_time(time, false)
    }

    fn put_local_date_time(&mut self, dt: NaiveDateTime) -> Result<(), JsonWriterError> {
        self.put_date(dt.date())?;
        self.put(b'T')?;
        self.put_time(dt.time(), false)
    }

    fn put_instant(&mut self, instant: DateTime<Utc>) -> Result<(), JsonWriterError> {
        let naive = instant.naive_utc();
        self.put_date(naive.date())?;
        self.put(b'T')?;
        self.put_time(naive.time(), true)?;
        self.put(b'Z')
    }

    fn put_offset_date_time(&mut self, dt: DateTime<FixedOffset>) -> Result<(), JsonWriterError> {
        self.put_local_date_time(dt.naive_local())?;
        self.put_offset(*dt.offset())
    }

    fn put_offset_time(&mut self, x: OffsetTime) -> Result<(), JsonWriterError> {
        self.put_time(x.time, false)?;
        self.put_offset(x.offset)
    }

    fn put_zoned_date_time(&mut self, x: ZonedDateTime) -> Result<(), JsonWriterError> {
        self.put_local_date_time(x.date_time)?;
        self.put_offset(x.offset)?;
        if let Some(zone) = x.zone {
            self.put(b'[')?;
            self.put_zone_id(zone)?;
            self.put(b']')?;
        }
        Ok(())
    }

    fn put_zone_id(&mut self, zone: ZoneId) -> Result<(), JsonWriterError> {
        match zone {
            ZoneId::Region(tz) => self.put_slice(tz.name().as_bytes()),
            ZoneId::Offset(offset) => self.put_offset(offset),
            ZoneId::Prefixed(prefix, offset) => {
                self.put_slice(prefix.text().as_bytes())?;
                if offset.local_minus_utc() != 0 {
                    self.put_offset(offset)?;
                }
                Ok(())
            }
        }
    }

    fn put_zone_offset(&mut self, offset: FixedOffset) -> Result<(), JsonWriterError> {
        self.put_offset(offset)
    }

    fn put_month_day(&mut self, x: MonthDay) -> Result<(), JsonWriterError> {
        self.put_slice(b"--")?;
        self.put_two(u32::from(x.month()))?;
        self.put(b'-')?;
        self.put_two(u32::from(x.day()))
    }

    fn put_year_value(&mut self, year: i32) -> Result<(), JsonWriterError> {
        self.put_year(year)
    }

    fn put_year_month(&mut self, x: YearMonth) -> Result<(), JsonWriterError> {
        self.put_year(x.year())?;
        self.put(b'-')?;
        self.put_two(u32::from(x.month()))
    }

    fn put_period(&mut self, x: Period) -> Result<(), JsonWriterError> {
        if x.is_zero() {
            return self.put_slice(b"P0D");
        }
        self.put(b'P')?;
        if x.years != 0 {
            self.put_signed_digits(i64::from(x.years))?;
            self.put(b'Y')?;
        }
        if x.months != 0 {
            self.put_signed_digits(i64::from(x.months))?;
            self.put(b'M')?;
        }
        if x.days != 0 {
            self.put_signed_digits(i64::from(x.days))?;
            self.put(b'D')?;
        }
        Ok(())
    }

    fn put_duration(&mut self, x: TimeDelta) -> Result<(), JsonWriterError> {
        // Recover the floor-normalized representation: seconds toward
        // negative infinity, nanos in [0, 1e9).
        let sub = x.subsec_nanos();
        let (seconds, nanos) = if sub < 0 {
            (x.num_seconds() - 1, sub + 1_000_000_000)
        } else {
            (x.num_seconds(), sub)
        };
        if seconds == 0 && nanos == 0 {
            return self.put_slice(b"PT0S");
        }
        let effective_total_secs = if seconds < 0 && nanos > 0 {
            seconds + 1
        } else {
            seconds
        };
        let hours = effective_total_secs / 3600;
        let minutes = effective_total_secs % 3600 / 60;
        let secs = effective_total_secs % 60;
        self.put_slice(b"PT")?;
        let mut any = false;
        if hours != 0 {
            self.put_signed_digits(hours)?;
            self.put(b'H')?;
            any = true;
        }
        if minutes != 0 {
            self.put_signed_digits(minutes)?;
            self.put(b'M')?;
            any = true;
        }
        if secs == 0 && nanos == 0 && any {
            return Ok(());
        }
        if seconds < 0 && nanos > 0 && secs == 0 {
            self.put_slice(b"-0")?;
        } else {
            self.put_signed_digits(secs)?;
        }
        if nanos > 0 {
            // Print against a power-of-ten anchor, then replace its lead
            // digit with the point; this right-pads the fraction for free.
            let anchored = if seconds < 0 {
                2_000_000_000 - i64::from(nanos)
            } else {
                1_000_000_000 + i64::from(nanos)
            };
            let mut digits = [0u8; 10];
            let mut v = anchored as u64;
            let mut i = 10;
            while v > 0 {
                i -= 1;
                digits[i] = b'0' + (v % 10) as u8;
                v /= 10;
            }
            digits[i] = b'.';
            let mut end = digits.len();
            while digits[end - 1] == b'0' {
                end -= 1;
            }
            self.put_slice(&digits[i..end])?;
        }
        self.put(b'S')
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
    fn duration_layout_matches_parse_grammar() {
        let cases = [
            (TimeDelta::zero(), "\"PT0S\""),
            (TimeDelta::new(0, 1).unwrap(), "\"PT0.000000001S\""),
            (TimeDelta::new(-61, 999_999_999).unwrap(), "\"PT-1M-0.000000001S\""),
            (TimeDelta::new(3661, 0).unwrap(), "\"PT1H1M1S\""),
            (TimeDelta::new(-3600, 0).unwrap(), "\"PT-1H\""),
            (TimeDelta::new(90, 500_000_000).unwrap(), "\"PT1M30.5S\""),
        ];
        for (delta, want) in cases {
            assert_eq!(emit(|w| w.write_duration(delta).unwrap()), want);
        }
    }

    #[test]
    fn fraction_widths_are_3_6_or_9() {
        let t = |n: u32| NaiveTime::from_hms_nano_opt(1, 2, 3, n).unwrap();
        assert_eq!(emit(|w| w.write_local_time(t(0)).unwrap()), "\"01:02:03\"");
        assert_eq!(
            emit(|w| w.write_local_time(t(500_000_000)).unwrap()),
            "\"01:02:03.500\""
        );
        assert_eq!(
            emit(|w| w.write_local_time(t(1_000)).unwrap()),
            "\"01:02:03.000001\""
        );
        assert_eq!(
            emit(|w| w.write_local_time(t(1)).unwrap()),
            "\"01:02:03.000000001\""
        );
    }

    #[test]
    fn timestamp_trims_trailing_zeros() {
        assert_eq!(emit(|w| w.write_timestamp(1, 0).unwrap()), "1");
        assert_eq!(emit(|w| w.write_timestamp(1, 500_000_000).unwrap()), "1.5");
        assert_eq!(
            emit(|w| w.write_timestamp(-1, 999_999_999).unwrap()),
            "-0.000000001"
        );
        let mut w = JsonWriter::to_vec(Vec::new(), WriterConfig::default());
        assert!(matches!(
            w.write_timestamp(0, 1_000_000_000),
            Err(JsonWriterError::IllegalNanoseconds(1_000_000_000))
        ));
    }

    #[test]
    fn year_padding_and_signs() {
        let d = |y: i32| chrono::NaiveDate::from_ymd_opt(y, 6, 15).unwrap();
        assert_eq!(emit(|w| w.write_local_date(d(2024)).unwrap()), "\"2024-06-15\"");
        assert_eq!(emit(|w| w.write_local_date(d(5)).unwrap()), "\"0005-06-15\"");
        assert_eq!(emit(|w| w.write_local_date(d(-5)).unwrap()), "\"-0005-06-15\"");
        assert_eq!(emit(|w| w.write_local_date(d(10_000)).unwrap()), "\"+10000-06-15\"");
    }
}
