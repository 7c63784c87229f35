//! Temporal value types that the `chrono` ecosystem does not provide, plus
//! the process-wide zone caches.
//!
//! The reader and writer bind the ISO-8601 taxonomy to `chrono` types where
//! they exist (`NaiveDate`, `NaiveDateTime`, `NaiveTime`, `DateTime<Utc>`,
//! `DateTime<FixedOffset>`, `FixedOffset`, `TimeDelta`) and to the types in
//! this module for the rest. [`ZonedDateTime`] keeps the parsed offset next
//! to its zone so re-encoding reproduces the original text even when the
//! offset is not the zone's canonical one at that instant.

use chrono::{FixedOffset, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use dashmap::DashMap;
use once_cell::sync::Lazy;

/// Maximum day number per month, leap-permitting (February is 29, as a
/// month-day is not bound to any particular year).
pub(crate) const MAX_DAY_OF_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A month and day without a year, e.g. `--12-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Returns `None` unless `month` is in `1..=12` and `day` fits the
    /// month (February admits 29).
    #[must_use]
    pub fn new(month: u8, day: u8) -> Option<Self> {
        if (1..=12).contains(&month) && day >= 1 && day <= MAX_DAY_OF_MONTH[month as usize - 1] {
            Some(Self { month, day })
        } else {
            None
        }
    }

    #[must_use]
    pub fn month(self) -> u8 {
        self.month
    }

    #[must_use]
    pub fn day(self) -> u8 {
        self.day
    }
}

/// A year and month, e.g. `2011-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12` and `year` is within
    /// `±999_999_999`.
    #[must_use]
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if (1..=12).contains(&month) && (-999_999_999..=999_999_999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(self) -> u8 {
        self.month
    }
}

/// A time of day with a fixed UTC offset, e.g. `10:15:30+01:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl OffsetTime {
    #[must_use]
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }
}

/// A date-based amount of years, months and days, e.g. `P1Y2M25D`.
///
/// Components keep their individual signs; no normalization across units is
/// performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    #[must_use]
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

/// Spelling of an offset-with-prefix zone identifier such as `UTC+01:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetPrefix {
    Utc,
    Gmt,
    Ut,
}

impl OffsetPrefix {
    #[must_use]
    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::Utc => "UTC",
            Self::Gmt => "GMT",
            Self::Ut => "UT",
        }
    }
}

/// A time-zone identifier: an IANA region, a plain offset, or a
/// `UTC`/`GMT`/`UT`-prefixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// An IANA region such as `Europe/Kyiv`.
    Region(Tz),
    /// A plain offset such as `+02:00` or `Z`.
    Offset(FixedOffset),
    /// A prefixed offset such as `UTC+01:00`; a bare prefix has offset zero.
    Prefixed(OffsetPrefix, FixedOffset),
}

/// A date-time with both the offset in effect and the governing zone, e.g.
/// `2011-12-03T10:15:30+01:00[Europe/Paris]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateTime {
    pub date_time: NaiveDateTime,
    pub offset: FixedOffset,
    /// `None` when the text carried no `[zone]` suffix; the offset alone
    /// governs.
    pub zone: Option<ZoneId>,
}

// ------------------------------------------------------------------------
// Process-wide caches
// ------------------------------------------------------------------------

/// Region-id cache, keyed by a 64-bit hash of the raw identifier bytes.
/// Entries are compared byte-for-byte on lookup; hash collisions degrade to
/// an uncached resolve. Inserts are last-writer-wins, which is safe because
/// the mapped value is canonical for its key.
static ZONE_IDS: Lazy<DashMap<u64, (Box<[u8]>, Tz)>> = Lazy::new(DashMap::new);

/// The 145 canonical quarter-hour offsets spanning -18:00..=+18:00.
static ZONE_OFFSETS: Lazy<Vec<FixedOffset>> = Lazy::new(|| {
    (-72..=72)
        .map(|q| FixedOffset::east_opt(q * 900).unwrap())
        .collect()
});

#[inline]
pub(crate) fn hash_zone_bytes(bytes: &[u8]) -> u64 {
    // FNV-1a
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    h
}

/// Resolves an IANA region identifier, consulting the process-wide cache.
pub(crate) fn resolve_region(bytes: &[u8]) -> Option<Tz> {
    let hash = hash_zone_bytes(bytes);
    if let Some(entry) = ZONE_IDS.get(&hash) {
        if entry.0.as_ref() == bytes {
            return Some(entry.1);
        }
        // Hash collision with different bytes: resolve without caching.
        return std::str::from_utf8(bytes).ok()?.parse().ok();
    }
    let tz: Tz = std::str::from_utf8(bytes).ok()?.parse().ok()?;
    ZONE_IDS.insert(hash, (bytes.into(), tz));
    Some(tz)
}

/// Returns the canonical offset instance for `total_seconds`, serving
/// quarter-hour offsets from the dense cache. `None` when outside ±18h.
pub(crate) fn zone_offset(total_seconds: i32) -> Option<FixedOffset> {
    if !(-64_800..=64_800).contains(&total_seconds) {
        return None;
    }
    if total_seconds % 900 == 0 {
        return Some(ZONE_OFFSETS[(total_seconds / 900 + 72) as usize]);
    }
    FixedOffset::east_opt(total_seconds)
}
