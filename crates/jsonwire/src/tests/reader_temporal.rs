//! Temporal parsing and its exact round trip through the formatters.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::{JsonReader, JsonWriter, ReaderConfig, ReaderErrorKind, WriterConfig, ZoneId};

fn reader(input: &[u8]) -> JsonReader<'_> {
    JsonReader::from_slice(input, String::new(), ReaderConfig::default())
}

fn writer() -> JsonWriter<'static> {
    JsonWriter::to_vec(Vec::new(), WriterConfig::default())
}

/// Parses the quoted text with `$read`, formats it back with `$write`, and
/// expects the identical text.
macro_rules! assert_round_trip {
    ($read:ident, $write:ident, $text:literal) => {{
        let quoted = format!("\"{}\"", $text);
        let value = reader(quoted.as_bytes()).$read().unwrap();
        let mut w = writer();
        w.$write(value).unwrap();
        assert_eq!(String::from_utf8(w.into_vec()).unwrap(), quoted);
    }};
}

#[test]
fn local_dates() {
    assert_round_trip!(read_local_date, write_local_date, "2024-02-29");
    assert_round_trip!(read_local_date, write_local_date, "0000-01-01");
    assert_round_trip!(read_local_date, write_local_date, "-0987-06-05");
    assert_round_trip!(read_local_date, write_local_date, "+10000-01-01");
    assert_eq!(
        reader(b"\"2024-02-29\"").read_local_date().unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn local_date_failures() {
    let cases: &[(&[u8], ReaderErrorKind)] = &[
        (b"\"2023-02-29\"", ReaderErrorKind::IllegalDay),
        (b"\"2024-00-10\"", ReaderErrorKind::IllegalMonth),
        (b"\"2024-13-10\"", ReaderErrorKind::IllegalMonth),
        (b"\"2024-04-31\"", ReaderErrorKind::IllegalDay),
        (b"\"2024-04-00\"", ReaderErrorKind::IllegalDay),
        (b"\"224-04-01\"", ReaderErrorKind::IllegalYear),
        (b"\"12024-04-01\"", ReaderErrorKind::IllegalYear),
        (b"\"-0000-01-01\"", ReaderErrorKind::IllegalYear),
        (b"\"2024/04/01\"", ReaderErrorKind::UnexpectedToken("'-'")),
    ];
    for (input, kind) in cases {
        assert_eq!(
            reader(input).read_local_date().unwrap_err().kind(),
            kind,
            "input {}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn local_times() {
    assert_round_trip!(read_local_time, write_local_time, "10:15");
    assert_round_trip!(read_local_time, write_local_time, "10:15:30");
    assert_round_trip!(read_local_time, write_local_time, "10:15:30.500");
    assert_round_trip!(read_local_time, write_local_time, "10:15:30.000001");
    assert_round_trip!(read_local_time, write_local_time, "23:59:59.999999999");
    assert_eq!(
        reader(b"\"10:15\"").read_local_time().unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap()
    );
    assert_eq!(
        reader(b"\"24:00\"").read_local_time().unwrap_err().kind(),
        &ReaderErrorKind::IllegalHour
    );
    assert_eq!(
        reader(b"\"10:60\"").read_local_time().unwrap_err().kind(),
        &ReaderErrorKind::IllegalMinute
    );
    assert_eq!(
        reader(b"\"10:15:60\"").read_local_time().unwrap_err().kind(),
        &ReaderErrorKind::IllegalSecond
    );
    assert_eq!(
        reader(b"\"10:15:30.\"").read_local_time().unwrap_err().kind(),
        &ReaderErrorKind::IllegalNanosecond
    );
}

#[test]
fn local_date_times() {
    assert_round_trip!(read_local_date_time, write_local_date_time, "2011-12-03T10:15");
    assert_round_trip!(
        read_local_date_time,
        write_local_date_time,
        "2011-12-03T10:15:30.123456789"
    );
}

#[test]
fn instants() {
    assert_round_trip!(read_instant, write_instant, "1970-01-01T00:00:00Z");
    assert_round_trip!(read_instant, write_instant, "2011-12-03T10:15:30.500Z");
    // An explicit offset shifts to UTC on the way in.
    let instant = reader(b"\"1970-01-01T01:00:00+01:00\"").read_instant().unwrap();
    assert_eq!(instant.timestamp(), 0);
    assert_eq!(
        reader(b"\"1970-01-01T00:00:00\"").read_instant().unwrap_err().kind(),
        &ReaderErrorKind::UnexpectedToken("'Z', '+' or '-'")
    );
}

#[test]
fn offset_date_times() {
    assert_round_trip!(
        read_offset_date_time,
        write_offset_date_time,
        "2011-12-03T10:15:30+01:00"
    );
    assert_round_trip!(
        read_offset_date_time,
        write_offset_date_time,
        "2011-12-03T10:15:30.123-05:30:15"
    );
    let dt = reader(b"\"2011-12-03T10:15:30+01:00\"")
        .read_offset_date_time()
        .unwrap();
    assert_eq!(dt.offset().local_minus_utc(), 3600);
    let utc_equivalent = NaiveDate::from_ymd_opt(2011, 12, 3)
        .unwrap()
        .and_hms_opt(9, 15, 30)
        .unwrap()
        .and_utc();
    assert_eq!(dt.naive_utc().and_utc(), utc_equivalent);
}

#[test]
fn offset_times() {
    assert_round_trip!(read_offset_time, write_offset_time, "10:15:30+01:00");
    assert_round_trip!(read_offset_time, write_offset_time, "10:15Z");
}

#[test]
fn zone_offsets() {
    assert_round_trip!(read_zone_offset, write_zone_offset, "Z");
    assert_round_trip!(read_zone_offset, write_zone_offset, "+01:00");
    assert_round_trip!(read_zone_offset, write_zone_offset, "-18:00");
    assert_round_trip!(read_zone_offset, write_zone_offset, "+05:45:30");
    let cases: &[(&[u8], ReaderErrorKind)] = &[
        (b"\"+19:00\"", ReaderErrorKind::IllegalTimezoneOffsetHour),
        (b"\"+01:60\"", ReaderErrorKind::IllegalTimezoneOffsetMinute),
        (b"\"+01:00:60\"", ReaderErrorKind::IllegalTimezoneOffsetSecond),
        (b"\"+18:00:01\"", ReaderErrorKind::IllegalTimezoneOffset),
        (b"\"x\"", ReaderErrorKind::UnexpectedToken("'Z', '+' or '-'")),
    ];
    for (input, kind) in cases {
        assert_eq!(
            reader(input).read_zone_offset().unwrap_err().kind(),
            kind,
            "input {}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn zone_ids() {
    assert_round_trip!(read_zone_id, write_zone_id, "Europe/Kyiv");
    assert_round_trip!(read_zone_id, write_zone_id, "Z");
    assert_round_trip!(read_zone_id, write_zone_id, "+02:00");
    assert_round_trip!(read_zone_id, write_zone_id, "UTC");
    assert_round_trip!(read_zone_id, write_zone_id, "UTC+01:00");
    assert_round_trip!(read_zone_id, write_zone_id, "GMT-05:00");
    assert_round_trip!(read_zone_id, write_zone_id, "UT+00:30");
    match reader(b"\"America/New_York\"").read_zone_id().unwrap() {
        ZoneId::Region(tz) => assert_eq!(tz.name(), "America/New_York"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        reader(b"\"Not/AZone\"").read_zone_id().unwrap_err().kind(),
        &ReaderErrorKind::IllegalTimezone
    );
}

#[test]
fn zoned_date_times() {
    assert_round_trip!(
        read_zoned_date_time,
        write_zoned_date_time,
        "2011-12-03T10:15:30+01:00[Europe/Paris]"
    );
    assert_round_trip!(
        read_zoned_date_time,
        write_zoned_date_time,
        "2011-12-03T10:15:30Z"
    );
    let zdt = reader(b"\"2011-12-03T10:15:30+02:00[Europe/Paris]\"")
        .read_zoned_date_time()
        .unwrap();
    // The parsed offset is preserved even when it is not the zone's
    // canonical offset at that instant.
    assert_eq!(zdt.offset.local_minus_utc(), 7200);
}

#[test]
fn years_and_partial_dates() {
    assert_round_trip!(read_year, write_year, "2024");
    assert_round_trip!(read_year, write_year, "0000");
    assert_round_trip!(read_year, write_year, "+999999999");
    assert_round_trip!(read_year, write_year, "-999999999");
    assert_round_trip!(read_year_month, write_year_month, "2011-12");
    assert_round_trip!(read_month_day, write_month_day, "--12-03");
    assert_round_trip!(read_month_day, write_month_day, "--02-29");
    assert_eq!(
        reader(b"\"--02-30\"").read_month_day().unwrap_err().kind(),
        &ReaderErrorKind::IllegalDay
    );
    assert_eq!(
        reader(b"\"+1000000000\"").read_year().unwrap_err().kind(),
        &ReaderErrorKind::IllegalYear
    );
}

#[test]
fn durations() {
    assert_round_trip!(read_duration, write_duration, "PT0S");
    assert_round_trip!(read_duration, write_duration, "PT1H1M1S");
    assert_round_trip!(read_duration, write_duration, "PT-1H");
    assert_round_trip!(read_duration, write_duration, "PT1M30.5S");
    assert_round_trip!(read_duration, write_duration, "PT-1M-0.000000001S");
    assert_eq!(
        reader(b"\"P1DT2H\"").read_duration().unwrap(),
        TimeDelta::new(93_600, 0).unwrap()
    );
    assert_eq!(
        reader(b"\"-PT1M\"").read_duration().unwrap(),
        TimeDelta::new(-60, 0).unwrap()
    );
    let cases: &[&[u8]] = &[
        b"\"P\"",
        b"\"PT\"",
        b"\"1S\"",
        b"\"PT1\"",
        b"\"P1D2H\"",
        b"\"PT1S1M\"",
    ];
    for input in cases {
        assert_eq!(
            reader(input).read_duration().unwrap_err().kind(),
            &ReaderErrorKind::IllegalDuration,
            "input {}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn periods() {
    assert_round_trip!(read_period, write_period, "P0D");
    assert_round_trip!(read_period, write_period, "P1Y2M25D");
    assert_round_trip!(read_period, write_period, "P-1Y-2M-3D");
    let p = reader(b"\"P2W\"").read_period().unwrap();
    assert_eq!((p.years, p.months, p.days), (0, 0, 14));
    let p = reader(b"\"-P1Y2D\"").read_period().unwrap();
    assert_eq!((p.years, p.months, p.days), (-1, 0, -2));
    assert_eq!(
        reader(b"\"P\"").read_period().unwrap_err().kind(),
        &ReaderErrorKind::IllegalPeriod
    );
    assert_eq!(
        reader(b"\"P3000000000Y\"").read_period().unwrap_err().kind(),
        &ReaderErrorKind::IllegalPeriod
    );
}

#[test]
fn typed_temporal_keys() {
    let mut r = reader(br#"{"2011-12-03": true}"#);
    assert!(r.is_next_token(b'{').unwrap());
    let date = r.read_key_as_local_date().unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2011, 12, 3).unwrap());
    assert!(r.read_boolean().unwrap());
}
