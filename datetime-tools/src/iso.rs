//! ISO-8601 parsing and rendering.
//!
//! Rendering follows the conventions hosts already expect from these actions:
//! local times drop zero seconds (`10:30`), fractions are printed in groups of
//! three digits, zone offsets use `Z` for UTC, and durations use the
//! `PT#H#M#S` form.

use std::fmt::Write;

use chrono::{
    Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday,
};

use crate::{ActionError, ActionResult};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Parses an ISO local date (`2025-04-17`).
///
/// Every field is fixed-width; unpadded, signed, or space-padded input is
/// rejected.
pub(crate) fn parse_date(text: &str) -> ActionResult<NaiveDate> {
    if !is_date_shape(text.as_bytes()) {
        return Err(ActionError::parse(text, "expected yyyy-MM-dd"));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| ActionError::parse(text, err))
}

/// Parses an ISO local date-time; seconds and fractions are optional.
pub(crate) fn parse_date_time(text: &str) -> ActionResult<NaiveDateTime> {
    let conforms = text.split_once('T').is_some_and(|(date, time)| {
        is_date_shape(date.as_bytes()) && is_time_shape(time.as_bytes())
    });
    if !conforms {
        return Err(ActionError::parse(text, "expected yyyy-MM-ddTHH:mm[:ss[.fffffffff]]"));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .map_err(|err| ActionError::parse(text, err))
}

fn all_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

/// `NNNN-NN-NN`
fn is_date_shape(bytes: &[u8]) -> bool {
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && all_digits(&bytes[..4])
        && all_digits(&bytes[5..7])
        && all_digits(&bytes[8..])
}

/// `NN:NN[:NN[.N{1,9}]]`
fn is_time_shape(bytes: &[u8]) -> bool {
    if bytes.len() < 5
        || bytes[2] != b':'
        || !all_digits(&bytes[..2])
        || !all_digits(&bytes[3..5])
    {
        return false;
    }
    let seconds = &bytes[5..];
    if seconds.is_empty() {
        return true;
    }
    if seconds.len() < 3 || seconds[0] != b':' || !all_digits(&seconds[1..3]) {
        return false;
    }
    match &seconds[3..] {
        [] => true,
        [b'.', fraction @ ..] => fraction.len() <= 9 && all_digits(fraction),
        _ => false,
    }
}

/// `HH:mm[:ss[.SSS…]]`, omitting seconds when both seconds and fraction are zero.
pub(crate) fn local_time(time: NaiveTime) -> String {
    let mut out = format!("{:02}:{:02}", time.hour(), time.minute());
    let nanos = time.nanosecond() % 1_000_000_000;
    if time.second() > 0 || nanos > 0 {
        let _ = write!(out, ":{:02}", time.second());
        if nanos > 0 {
            if nanos % 1_000_000 == 0 {
                let _ = write!(out, ".{:03}", nanos / 1_000_000);
            } else if nanos % 1_000 == 0 {
                let _ = write!(out, ".{:06}", nanos / 1_000);
            } else {
                let _ = write!(out, ".{nanos:09}");
            }
        }
    }
    out
}

/// Compact local date-time: `2025-04-17T10:30`.
pub(crate) fn local_date_time(value: NaiveDateTime) -> String {
    format!("{}T{}", value.date(), local_time(value.time()))
}

/// Full local date-time with seconds always present: `2025-04-17T10:30:00`.
pub(crate) fn full_local_date_time(value: NaiveDateTime) -> String {
    let mut out = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = value.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let digits = format!("{nanos:09}");
        let _ = write!(out, ".{}", digits.trim_end_matches('0'));
    }
    out
}

/// Offset identifier: `Z` for UTC, otherwise `+HH:MM` (`+HH:MM:SS` when needed).
pub(crate) fn offset_id(offset: FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_owned();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Upper-case English day name (`MONDAY`).
pub(crate) const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Days of the week indexed from Monday.
pub(crate) const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Proleptic Gregorian leap-year rule.
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the month containing `date`.
pub(crate) fn length_of_month(date: NaiveDate) -> u32 {
    match date.month() {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(date.year()) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Shifts a date by whole days.
pub(crate) fn plus_days(date: NaiveDate, days: i64) -> ActionResult<NaiveDate> {
    let delta = checked(TimeDelta::try_days(days), "day offset")?;
    checked(date.checked_add_signed(delta), "date")
}

/// Monday of the ISO week containing `date`.
pub(crate) fn monday_of(date: NaiveDate) -> ActionResult<NaiveDate> {
    plus_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Splits a duration into floored seconds and a non-negative nanosecond part.
pub(crate) fn split_duration(delta: TimeDelta) -> (i64, i64) {
    let mut seconds = delta.num_seconds();
    let mut nanos = i64::from(delta.subsec_nanos());
    if nanos < 0 {
        seconds -= 1;
        nanos += NANOS_PER_SECOND;
    }
    (seconds, nanos)
}

/// ISO-8601 duration limited to hours, minutes, and seconds (`PT5H30M`).
pub(crate) fn duration(delta: TimeDelta) -> String {
    let (seconds, nanos) = split_duration(delta);
    if seconds == 0 && nanos == 0 {
        return "PT0S".to_owned();
    }

    let effective = if seconds < 0 && nanos > 0 {
        seconds + 1
    } else {
        seconds
    };
    let hours = effective / 3600;
    let minutes = (effective % 3600) / 60;
    let secs = effective % 60;

    let mut out = String::from("PT");
    if hours != 0 {
        let _ = write!(out, "{hours}H");
    }
    if minutes != 0 {
        let _ = write!(out, "{minutes}M");
    }
    if secs == 0 && nanos == 0 && out.len() > 2 {
        return out;
    }
    if seconds < 0 && nanos > 0 && secs == 0 {
        out.push_str("-0");
    } else {
        let _ = write!(out, "{secs}");
    }
    if nanos > 0 {
        let fraction = if seconds < 0 {
            2 * NANOS_PER_SECOND - nanos
        } else {
            nanos + NANOS_PER_SECOND
        };
        let digits = fraction.to_string();
        let digits = digits.trim_end_matches('0');
        let _ = write!(out, ".{}", &digits[1..]);
    }
    out.push('S');
    out
}

/// Converts a [`TimeDelta`] overflow into an error.
pub(crate) fn checked<T>(value: Option<T>, what: &str) -> ActionResult<T> {
    value.ok_or_else(|| ActionError::out_of_range(format!("{what} exceeds the supported range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32, nanos: u32) -> NaiveTime {
        NaiveTime::from_hms_nano_opt(h, m, s, nanos).unwrap()
    }

    #[test]
    fn local_time_drops_zero_seconds() {
        assert_eq!(local_time(time(1, 30, 0, 0)), "01:30");
        assert_eq!(local_time(time(0, 59, 30, 0)), "00:59:30");
        assert_eq!(local_time(time(10, 0, 0, 500_000_000)), "10:00:00.500");
        assert_eq!(local_time(time(10, 0, 0, 1_000)), "10:00:00.000001");
        assert_eq!(local_time(time(23, 59, 59, 999_999_999)), "23:59:59.999999999");
    }

    #[test]
    fn full_local_keeps_seconds() {
        let value = parse_date_time("2025-04-17T10:00").unwrap();
        assert_eq!(full_local_date_time(value), "2025-04-17T10:00:00");
        let value = parse_date_time("2025-04-17T10:00:00.120").unwrap();
        assert_eq!(full_local_date_time(value), "2025-04-17T10:00:00.12");
    }

    #[test]
    fn parses_iso_inputs() {
        assert!(parse_date("2025-04-17").is_ok());
        assert!(parse_date("2025/04/17").unwrap_err().is_parse());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date_time("2025-13-01T10:00:00").is_err());
        assert!(parse_date_time("2025-04-17T10:00:00.123456789").is_ok());
    }

    #[test]
    fn rejects_lenient_iso_shapes() {
        for text in [
            "2025-4-7",
            "2025-04-7",
            " 2025-04-17",
            "2025-04-17 ",
            "+2025-04-18",
            "-2025-04-18",
            "20250417",
        ] {
            assert!(parse_date(text).unwrap_err().is_parse(), "{text:?}");
        }
        for text in [
            "2025-04-17T1:5",
            "2025-04-17T10:5",
            "2025-04-17T10:00:5",
            "2025-04-17T10:00:00.",
            "2025-04-17T10:00:00.1234567890",
            "2025-04-17 10:00",
            "2025-4-17T10:00",
            " 2025-04-17T10:00",
            "+2025-04-17T10:00",
            "2025-04-17T10:00Z",
        ] {
            assert!(parse_date_time(text).unwrap_err().is_parse(), "{text:?}");
        }
        assert!(parse_date_time("2025-04-17T10:00").is_ok());
        assert!(parse_date_time("2025-04-17T10:00:05").is_ok());
        assert!(parse_date_time("2025-04-17T10:00:05.5").is_ok());
    }

    #[test]
    fn offsets_render_like_ids() {
        assert_eq!(offset_id(FixedOffset::east_opt(0).unwrap()), "Z");
        assert_eq!(offset_id(FixedOffset::east_opt(9 * 3600).unwrap()), "+09:00");
        assert_eq!(offset_id(FixedOffset::west_opt(5 * 3600 + 1800).unwrap()), "-05:30");
    }

    #[test]
    fn calendar_helpers() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(length_of_month(parse_date("2024-02-10").unwrap()), 29);
        assert_eq!(length_of_month(parse_date("2023-02-10").unwrap()), 28);
        assert_eq!(length_of_month(parse_date("2025-12-01").unwrap()), 31);
        assert_eq!(
            monday_of(parse_date("2025-04-20").unwrap()).unwrap(),
            parse_date("2025-04-14").unwrap()
        );
        assert!(plus_days(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn durations_render_iso() {
        assert_eq!(duration(TimeDelta::hours(2)), "PT2H");
        assert_eq!(duration(TimeDelta::hours(-2)), "PT-2H");
        assert_eq!(duration(TimeDelta::zero()), "PT0S");
        assert_eq!(duration(TimeDelta::minutes(330)), "PT5H30M");
        assert_eq!(duration(TimeDelta::milliseconds(1500)), "PT1.5S");
        assert_eq!(duration(TimeDelta::milliseconds(-500)), "PT-0.5S");
        assert_eq!(duration(TimeDelta::seconds(86_400 + 61)), "PT24H1M1S");
    }
}
