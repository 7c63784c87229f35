//! Fixed-grammar ISO-8601 parsers for the temporal taxonomy.
//!
//! Each type has a dedicated byte-level parser rather than a format-string
//! interpreter. Years accept four digits unsigned or a sign followed by
//! four to nine digits; month, day, hour, minute and second ranges are
//! validated inline (including per-month day limits with the Gregorian
//! leap-year rule); fractional seconds consume up to nine digits. `Z` is
//! canonicalized to the UTC offset. Region identifiers resolve through the
//! process-wide cache in [`crate::temporal`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::error::{JsonReaderError, ReaderErrorKind};
use crate::reader::JsonReader;
use crate::temporal::{
    self, MonthDay, OffsetPrefix, OffsetTime, Period, YearMonth, ZoneId, ZonedDateTime,
    MAX_DAY_OF_MONTH,
};

#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn max_day(year: i32, month: u32) -> u32 {
    if month == 2 && !is_leap_year(year) {
        28
    } else {
        u32::from(MAX_DAY_OF_MONTH[month as usize - 1])
    }
}

macro_rules! temporal_readers {
    ($($read:ident, $read_key:ident, $parse:ident, $ty:ty;)*) => {$(
        /// Reads the quoted ISO-8601 form of this temporal type.
        pub fn $read(&mut self) -> Result<$ty, JsonReaderError> {
            self.next_token_expect_quote()?;
            self.$parse()
        }

        /// Reads this temporal type as an object key followed by a colon.
        pub fn $read_key(&mut self) -> Result<$ty, JsonReaderError> {
            self.next_token_expect_quote()?;
            let x = self.$parse()?;
            self.read_colon()?;
            Ok(x)
        }
    )*};
}

impl JsonReader<'_> {
    temporal_readers! {
        read_duration, read_key_as_duration, parse_duration, TimeDelta;
        read_instant, read_key_as_instant, parse_instant, DateTime<Utc>;
        read_local_date, read_key_as_local_date, parse_local_date, NaiveDate;
        read_local_date_time, read_key_as_local_date_time, parse_local_date_time, NaiveDateTime;
        read_local_time, read_key_as_local_time, parse_local_time, NaiveTime;
        read_month_day, read_key_as_month_day, parse_month_day, MonthDay;
        read_offset_date_time, read_key_as_offset_date_time, parse_offset_date_time,
            DateTime<FixedOffset>;
        read_offset_time, read_key_as_offset_time, parse_offset_time, OffsetTime;
        read_period, read_key_as_period, parse_period, Period;
        read_year, read_key_as_year, parse_year_value, i32;
        read_year_month, read_key_as_year_month, parse_year_month, YearMonth;
        read_zoned_date_time, read_key_as_zoned_date_time, parse_zoned_date_time, ZonedDateTime;
        read_zone_id, read_key_as_zone_id, parse_zone_id, ZoneId;
        read_zone_offset, read_key_as_zone_offset, parse_zone_offset_value, FixedOffset;
    }

    // --------------------------------------------------------------------
    // Shared pieces
    // --------------------------------------------------------------------

    /// Looks at the next byte without consuming it; `None` at end of input.
    fn peek_byte(&mut self) -> Result<Option<u8>, JsonReaderError> {
        let mut pos = self.head;
        if pos >= self.tail {
            pos = self.load_more(pos)?;
            if pos >= self.tail {
                self.head = pos;
                return Ok(None);
            }
        }
        self.head = pos;
        Ok(Some(self.bytes()[pos]))
    }

    fn expect_sep(&mut self, sep: u8, token: &'static str) -> Result<(), JsonReaderError> {
        if self.next_byte()? != sep {
            return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken(token)));
        }
        Ok(())
    }

    fn two_digits(&mut self, kind: ReaderErrorKind) -> Result<u32, JsonReaderError> {
        let hi = self.next_byte()?;
        let lo = self.next_byte()?;
        if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
            return Err(self.error_at_prev(kind));
        }
        Ok(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
    }

    /// Year: four digits unsigned, or `+`/`-` followed by four to nine
    /// digits; negative zero and ten-digit forms are rejected.
    fn parse_year(&mut self) -> Result<i32, JsonReaderError> {
        let b = self.next_byte()?;
        let (signed, neg) = match b {
            b'-' => (true, true),
            b'+' => (true, false),
            _ => {
                self.head -= 1;
                (false, false)
            }
        };
        let mut digits = 0u32;
        let mut year: i64 = 0;
        loop {
            let Some(d) = self.peek_byte()? else { break };
            if !d.is_ascii_digit() {
                break;
            }
            self.head += 1;
            digits += 1;
            if digits > 9 {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalYear));
            }
            year = year * 10 + i64::from(d - b'0');
        }
        if digits < 4 || (!signed && digits > 4) {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalYear));
        }
        if neg {
            if year == 0 {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalYear));
            }
            year = -year;
        }
        Ok(year as i32)
    }

    fn parse_month(&mut self) -> Result<u32, JsonReaderError> {
        let m = self.two_digits(ReaderErrorKind::IllegalMonth)?;
        if !(1..=12).contains(&m) {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalMonth));
        }
        Ok(m)
    }

    fn parse_day(&mut self, year: i32, month: u32) -> Result<u32, JsonReaderError> {
        let d = self.two_digits(ReaderErrorKind::IllegalDay)?;
        if d < 1 || d > max_day(year, month) {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalDay));
        }
        Ok(d)
    }

    /// `year-month-day`; the trailing byte is left unconsumed.
    fn parse_ymd(&mut self) -> Result<(i32, u32, u32), JsonReaderError> {
        let year = self.parse_year()?;
        self.expect_sep(b'-', "'-'")?;
        let month = self.parse_month()?;
        self.expect_sep(b'-', "'-'")?;
        let day = self.parse_day(year, month)?;
        Ok((year, month, day))
    }

    /// `hour:minute[:second[.fraction]]`; the trailing byte is left
    /// unconsumed.
    fn parse_hms(&mut self) -> Result<(u32, u32, u32, u32), JsonReaderError> {
        let hour = self.two_digits(ReaderErrorKind::IllegalHour)?;
        if hour > 23 {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalHour));
        }
        self.expect_sep(b':', "':'")?;
        let minute = self.two_digits(ReaderErrorKind::IllegalMinute)?;
        if minute > 59 {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalMinute));
        }
        let mut second = 0;
        let mut nano = 0;
        if self.peek_byte()? == Some(b':') {
            self.head += 1;
            second = self.two_digits(ReaderErrorKind::IllegalSecond)?;
            if second > 59 {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalSecond));
            }
            if self.peek_byte()? == Some(b'.') {
                self.head += 1;
                nano = self.parse_nanos()?;
            }
        }
        Ok((hour, minute, second, nano))
    }

    /// One to nine fractional digits, scaled to nanoseconds; a tenth digit
    /// is left for the caller's terminator check to reject.
    fn parse_nanos(&mut self) -> Result<u32, JsonReaderError> {
        let mut value = 0u32;
        let mut digits = 0u32;
        while digits < 9 {
            let Some(d) = self.peek_byte()? else { break };
            if !d.is_ascii_digit() {
                break;
            }
            self.head += 1;
            value = value * 10 + u32::from(d - b'0');
            digits += 1;
        }
        if digits == 0 {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalNanosecond));
        }
        while digits < 9 {
            value *= 10;
            digits += 1;
        }
        Ok(value)
    }

    /// Offset after its sign byte: `HH[:MM[:SS]]`, bounded to ±18 hours.
    fn parse_offset_tail(&mut self, neg: bool) -> Result<FixedOffset, JsonReaderError> {
        let hour = self.two_digits(ReaderErrorKind::IllegalTimezoneOffsetHour)?;
        if hour > 18 {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffsetHour));
        }
        let mut minute = 0;
        let mut second = 0;
        if self.peek_byte()? == Some(b':') {
            self.head += 1;
            minute = self.two_digits(ReaderErrorKind::IllegalTimezoneOffsetMinute)?;
            if minute > 59 {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffsetMinute));
            }
            if self.peek_byte()? == Some(b':') {
                self.head += 1;
                second = self.two_digits(ReaderErrorKind::IllegalTimezoneOffsetSecond)?;
                if second > 59 {
                    return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffsetSecond));
                }
            }
        }
        let mut total = (hour * 3600 + minute * 60 + second) as i32;
        if neg {
            total = -total;
        }
        temporal::zone_offset(total)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffset))
    }

    /// `Z` or a signed offset; the first byte is already consumed and
    /// passed in.
    fn parse_offset_or_z(&mut self, first: u8) -> Result<FixedOffset, JsonReaderError> {
        match first {
            b'Z' => temporal::zone_offset(0)
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffset)),
            b'+' => self.parse_offset_tail(false),
            b'-' => self.parse_offset_tail(true),
            _ => Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'Z', '+' or '-'"))),
        }
    }

    // --------------------------------------------------------------------
    // Value parsers (opening quote consumed; closing quote consumed here)
    // --------------------------------------------------------------------

    pub(crate) fn parse_local_date(&mut self) -> Result<NaiveDate, JsonReaderError> {
        let (y, m, d) = self.parse_ymd()?;
        self.expect_sep(b'"', "'\"'")?;
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalYear))
    }

    pub(crate) fn parse_local_date_time(&mut self) -> Result<NaiveDateTime, JsonReaderError> {
        let ndt = self.parse_local_date_time_part()?;
        self.expect_sep(b'"', "'\"'")?;
        Ok(ndt)
    }

    fn parse_local_date_time_part(&mut self) -> Result<NaiveDateTime, JsonReaderError> {
        let (y, m, d) = self.parse_ymd()?;
        self.expect_sep(b'T', "'T'")?;
        let (hh, mm, ss, nano) = self.parse_hms()?;
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalYear))?;
        let time = NaiveTime::from_hms_nano_opt(hh, mm, ss, nano)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalSecond))?;
        Ok(date.and_time(time))
    }

    pub(crate) fn parse_local_time(&mut self) -> Result<NaiveTime, JsonReaderError> {
        let (hh, mm, ss, nano) = self.parse_hms()?;
        self.expect_sep(b'"', "'\"'")?;
        NaiveTime::from_hms_nano_opt(hh, mm, ss, nano)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalSecond))
    }

    pub(crate) fn parse_instant(&mut self) -> Result<DateTime<Utc>, JsonReaderError> {
        let ndt = self.parse_local_date_time_part()?;
        let b = self.next_byte()?;
        let offset = self.parse_offset_or_z(b)?;
        self.expect_sep(b'"', "'\"'")?;
        let utc = ndt
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDate))?;
        Ok(utc.and_utc())
    }

    pub(crate) fn parse_offset_date_time(
        &mut self,
    ) -> Result<DateTime<FixedOffset>, JsonReaderError> {
        let ndt = self.parse_local_date_time_part()?;
        let b = self.next_byte()?;
        let offset = self.parse_offset_or_z(b)?;
        self.expect_sep(b'"', "'\"'")?;
        let utc = ndt
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDate))?;
        Ok(DateTime::from_naive_utc_and_offset(utc, offset))
    }

    pub(crate) fn parse_offset_time(&mut self) -> Result<OffsetTime, JsonReaderError> {
        let (hh, mm, ss, nano) = self.parse_hms()?;
        let b = self.next_byte()?;
        let offset = self.parse_offset_or_z(b)?;
        self.expect_sep(b'"', "'\"'")?;
        let time = NaiveTime::from_hms_nano_opt(hh, mm, ss, nano)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalSecond))?;
        Ok(OffsetTime::new(time, offset))
    }

    pub(crate) fn parse_zoned_date_time(&mut self) -> Result<ZonedDateTime, JsonReaderError> {
        let ndt = self.parse_local_date_time_part()?;
        let b = self.next_byte()?;
        let offset = self.parse_offset_or_z(b)?;
        let zone = match self.next_byte()? {
            b'"' => None,
            b'[' => {
                let zone = self.parse_zone_id_until(b']')?;
                self.expect_sep(b'"', "'\"'")?;
                Some(zone)
            }
            _ => {
                return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'\"' or '['")));
            }
        };
        Ok(ZonedDateTime {
            date_time: ndt,
            offset,
            zone,
        })
    }

    pub(crate) fn parse_month_day(&mut self) -> Result<MonthDay, JsonReaderError> {
        self.expect_sep(b'-', "'-'")?;
        self.expect_sep(b'-', "'-'")?;
        let month = self.parse_month()?;
        self.expect_sep(b'-', "'-'")?;
        let day = self.two_digits(ReaderErrorKind::IllegalDay)?;
        self.expect_sep(b'"', "'\"'")?;
        MonthDay::new(month as u8, day as u8)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDay))
    }

    pub(crate) fn parse_year_value(&mut self) -> Result<i32, JsonReaderError> {
        let year = self.parse_year()?;
        self.expect_sep(b'"', "'\"'")?;
        Ok(year)
    }

    pub(crate) fn parse_year_month(&mut self) -> Result<YearMonth, JsonReaderError> {
        let year = self.parse_year()?;
        self.expect_sep(b'-', "'-'")?;
        let month = self.parse_month()?;
        self.expect_sep(b'"', "'\"'")?;
        YearMonth::new(year, month as u8)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalYear))
    }

    pub(crate) fn parse_zone_offset_value(&mut self) -> Result<FixedOffset, JsonReaderError> {
        let b = self.next_byte()?;
        let offset = self.parse_offset_or_z(b)?;
        self.expect_sep(b'"', "'\"'")?;
        Ok(offset)
    }

    pub(crate) fn parse_zone_id(&mut self) -> Result<ZoneId, JsonReaderError> {
        self.parse_zone_id_until(b'"')
    }

    /// Collects identifier bytes up to `end` and classifies them: `Z`, a
    /// plain offset, a `UTC`/`GMT`/`UT` prefixed offset, or a cached region
    /// lookup.
    fn parse_zone_id_until(&mut self, end: u8) -> Result<ZoneId, JsonReaderError> {
        self.char_buf.clear();
        loop {
            let b = self.next_byte()?;
            if b == end {
                break;
            }
            if !(0x20..0x7F).contains(&b) {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezone));
            }
            self.char_buf.push(b as char);
            if self.char_buf.len() > 64 {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezone));
            }
        }
        let text = self.char_buf.as_bytes();
        if text.is_empty() {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalTimezone));
        }
        if text == b"Z" {
            return temporal::zone_offset(0)
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezone))
                .map(ZoneId::Offset);
        }
        if text[0] == b'+' || text[0] == b'-' {
            let secs = parse_offset_seconds_text(text)
                .map_err(|kind| self.error_at_prev(kind))?;
            return temporal::zone_offset(secs)
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffset))
                .map(ZoneId::Offset);
        }
        for (prefix, name) in [
            (OffsetPrefix::Utc, &b"UTC"[..]),
            (OffsetPrefix::Gmt, &b"GMT"[..]),
            (OffsetPrefix::Ut, &b"UT"[..]),
        ] {
            if let Some(rest) = text.strip_prefix(name) {
                if rest.is_empty() {
                    return temporal::zone_offset(0)
                        .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezone))
                        .map(|o| ZoneId::Prefixed(prefix, o));
                }
                if rest[0] == b'+' || rest[0] == b'-' {
                    let secs = parse_offset_seconds_text(rest)
                        .map_err(|kind| self.error_at_prev(kind))?;
                    return temporal::zone_offset(secs)
                        .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezoneOffset))
                        .map(|o| ZoneId::Prefixed(prefix, o));
                }
                // Identifiers like `UTCx` fall through to region lookup.
            }
        }
        let tz = temporal::resolve_region(text)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalTimezone))?;
        Ok(ZoneId::Region(tz))
    }

    // --------------------------------------------------------------------
    // Duration and period
    // --------------------------------------------------------------------

    pub(crate) fn parse_duration(&mut self) -> Result<TimeDelta, JsonReaderError> {
        let mut b = self.next_byte()?;
        let neg_all = b == b'-';
        if neg_all {
            b = self.next_byte()?;
        }
        if b != b'P' {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
        }
        let mut seconds: i64 = 0;
        let mut nano_adjust: i64 = 0;
        let mut any = false;
        let mut in_time = false;
        let mut last_unit = 0u8; // 0 none, 1 D, 2 H, 3 M, 4 S
        loop {
            b = self.next_byte()?;
            if b == b'"' {
                break;
            }
            if b == b'T' {
                if in_time {
                    return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
                }
                in_time = true;
                b = self.next_byte()?;
            }
            let neg = b == b'-';
            if neg || b == b'+' {
                b = self.next_byte()?;
            }
            if !b.is_ascii_digit() {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
            }
            // Negative-space accumulation so i64::MIN seconds is reachable.
            let mut amount: i64 = -i64::from(b - b'0');
            loop {
                let Some(d) = self.peek_byte()? else { break };
                if !d.is_ascii_digit() {
                    break;
                }
                self.head += 1;
                if amount < i64::MIN / 10 {
                    return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
                }
                amount = amount.wrapping_mul(10).wrapping_sub(i64::from(d - b'0'));
                if amount > 0 {
                    return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
                }
            }
            let mut frac: i64 = 0;
            let unit = self.next_byte()?;
            let (scale, unit_rank) = match unit {
                b'D' if !in_time => (86_400, 1u8),
                b'H' if in_time => (3600, 2),
                b'M' if in_time => (60, 3),
                b'S' if in_time => (1, 4),
                b'.' if in_time => {
                    // Fractional seconds; sign distributes over the fraction.
                    let nanos = self.parse_nanos()?;
                    if self.next_byte()? != b'S' {
                        return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
                    }
                    frac = i64::from(nanos);
                    (1, 4)
                }
                _ => return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration)),
            };
            if unit_rank <= last_unit {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
            }
            last_unit = unit_rank;
            any = true;
            // `amount` is the negated magnitude; restore the component sign.
            let signed = if neg {
                amount
            } else if amount == i64::MIN {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
            } else {
                -amount
            };
            seconds = signed
                .checked_mul(scale)
                .and_then(|s| seconds.checked_add(s))
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDuration))?;
            if frac != 0 {
                nano_adjust = if neg { -frac } else { frac };
            }
        }
        if !any {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalDuration));
        }
        if neg_all {
            seconds = seconds
                .checked_neg()
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDuration))?;
            nano_adjust = -nano_adjust;
        }
        // Normalize to seconds plus nanoseconds in [0, 1e9).
        if nano_adjust < 0 {
            seconds = seconds
                .checked_sub(1)
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDuration))?;
            nano_adjust += 1_000_000_000;
        }
        TimeDelta::new(seconds, nano_adjust as u32)
            .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalDuration))
    }

    pub(crate) fn parse_period(&mut self) -> Result<Period, JsonReaderError> {
        let mut b = self.next_byte()?;
        let neg_all = b == b'-';
        if neg_all {
            b = self.next_byte()?;
        }
        if b != b'P' {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod));
        }
        let mut years: i32 = 0;
        let mut months: i32 = 0;
        let mut days: i32 = 0;
        let mut any = false;
        let mut last_unit = 0u8; // 0 none, 1 Y, 2 M, 3 W, 4 D
        loop {
            b = self.next_byte()?;
            if b == b'"' {
                break;
            }
            let neg = b == b'-';
            if neg || b == b'+' {
                b = self.next_byte()?;
            }
            if !b.is_ascii_digit() {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod));
            }
            let mut amount: i64 = i64::from(b - b'0');
            loop {
                let Some(d) = self.peek_byte()? else { break };
                if !d.is_ascii_digit() {
                    break;
                }
                self.head += 1;
                amount = amount * 10 + i64::from(d - b'0');
                if amount > i64::from(u32::MAX) {
                    return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod));
                }
            }
            let signed = if neg { -amount } else { amount };
            let unit = self.next_byte()?;
            let rank = match unit {
                b'Y' => 1u8,
                b'M' => 2,
                b'W' => 3,
                b'D' => 4,
                _ => return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod)),
            };
            if rank <= last_unit {
                return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod));
            }
            last_unit = rank;
            any = true;
            let as_i32 = |v: i64| {
                i32::try_from(v).map_err(|_| self.error_at_prev(ReaderErrorKind::IllegalPeriod))
            };
            match rank {
                1 => years = as_i32(signed)?,
                2 => months = as_i32(signed)?,
                3 => {
                    days = signed
                        .checked_mul(7)
                        .and_then(|w| i64::from(days).checked_add(w))
                        .and_then(|v| i32::try_from(v).ok())
                        .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalPeriod))?;
                }
                _ => {
                    days = i64::from(days)
                        .checked_add(signed)
                        .and_then(|v| i32::try_from(v).ok())
                        .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalPeriod))?;
                }
            }
        }
        if !any {
            return Err(self.error_at_prev(ReaderErrorKind::IllegalPeriod));
        }
        if neg_all {
            years = years
                .checked_neg()
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalPeriod))?;
            months = months
                .checked_neg()
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalPeriod))?;
            days = days
                .checked_neg()
                .ok_or_else(|| self.error_at_prev(ReaderErrorKind::IllegalPeriod))?;
        }
        Ok(Period::new(years, months, days))
    }
}

/// Parses `+HH[:MM[:SS]]` / `-HH[:MM[:SS]]` from collected identifier text.
fn parse_offset_seconds_text(text: &[u8]) -> Result<i32, ReaderErrorKind> {
    let neg = text[0] == b'-';
    let rest = &text[1..];
    let two = |chunk: &[u8], kind: ReaderErrorKind| -> Result<i32, ReaderErrorKind> {
        if chunk.len() != 2 || !chunk[0].is_ascii_digit() || !chunk[1].is_ascii_digit() {
            return Err(kind);
        }
        Ok(i32::from(chunk[0] - b'0') * 10 + i32::from(chunk[1] - b'0'))
    };
    let mut parts = rest.split(|&b| b == b':');
    let hour = two(
        parts.next().unwrap_or(&[]),
        ReaderErrorKind::IllegalTimezoneOffsetHour,
    )?;
    if hour > 18 {
        return Err(ReaderErrorKind::IllegalTimezoneOffsetHour);
    }
    let minute = match parts.next() {
        Some(chunk) => {
            let m = two(chunk, ReaderErrorKind::IllegalTimezoneOffsetMinute)?;
            if m > 59 {
                return Err(ReaderErrorKind::IllegalTimezoneOffsetMinute);
            }
            m
        }
        None => 0,
    };
    let second = match parts.next() {
        Some(chunk) => {
            let s = two(chunk, ReaderErrorKind::IllegalTimezoneOffsetSecond)?;
            if s > 59 {
                return Err(ReaderErrorKind::IllegalTimezoneOffsetSecond);
            }
            s
        }
        None => 0,
    };
    if parts.next().is_some() {
        return Err(ReaderErrorKind::IllegalTimezoneOffset);
    }
    let total = hour * 3600 + minute * 60 + second;
    Ok(if neg { -total } else { total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn offset_text_forms() {
        assert_eq!(parse_offset_seconds_text(b"+01:00"), Ok(3600));
        assert_eq!(parse_offset_seconds_text(b"-05"), Ok(-18000));
        assert_eq!(parse_offset_seconds_text(b"+01:30:15"), Ok(5415));
        assert_eq!(
            parse_offset_seconds_text(b"+19:00"),
            Err(ReaderErrorKind::IllegalTimezoneOffsetHour)
        );
        assert_eq!(
            parse_offset_seconds_text(b"+01:60"),
            Err(ReaderErrorKind::IllegalTimezoneOffsetMinute)
        );
    }
}
