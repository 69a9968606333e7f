//! Date and date-time arithmetic.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::{ActionError, ActionResult, action, iso};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole-unit breakdown of a duration.
///
/// Every field carries the sign of the duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    /// Whole days.
    pub days: i64,
    /// Hours remaining after the days, `-23..=23`.
    pub hours: i64,
    /// Minutes remaining after the hours.
    pub minutes: i64,
    /// Seconds remaining after the minutes.
    pub seconds: i64,
}

fn shift_months(date: NaiveDate, months: i64) -> ActionResult<NaiveDate> {
    let magnitude = u32::try_from(months.unsigned_abs())
        .map_err(|_| ActionError::out_of_range(format!("{months} months")))?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    };
    iso::checked(shifted, "date")
}

fn shift(value: NaiveDateTime, delta: Option<TimeDelta>) -> ActionResult<String> {
    let delta = iso::checked(delta, "offset")?;
    let shifted = iso::checked(value.checked_add_signed(delta), "date-time")?;
    Ok(iso::local_date_time(shifted))
}

fn negate(amount: i64) -> ActionResult<i64> {
    iso::checked(amount.checked_neg(), "offset")
}

fn between(start: &str, end: &str) -> ActionResult<TimeDelta> {
    let start = iso::parse_date_time(start)?;
    let end = iso::parse_date_time(end)?;
    Ok(end.signed_duration_since(start))
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Adds the given number of days to the ISO date string")]
pub fn add_days(date_iso: &str, days: i64) -> ActionResult<String> {
    Ok(iso::plus_days(iso::parse_date(date_iso)?, days)?.to_string())
}

/// Month arithmetic clamps to the last valid day (`2025-01-31` + 1 month is
/// `2025-02-28`).
///
/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Adds the given number of months to the ISO date string")]
pub fn add_months(date_iso: &str, months: i64) -> ActionResult<String> {
    Ok(shift_months(iso::parse_date(date_iso)?, months)?.to_string())
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Adds the given number of years to the ISO date string")]
pub fn add_years(date_iso: &str, years: i64) -> ActionResult<String> {
    let months = iso::checked(years.checked_mul(12), "year offset")?;
    Ok(shift_months(iso::parse_date(date_iso)?, months)?.to_string())
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Subtracts the given number of days from the ISO date string")]
pub fn subtract_days(date_iso: &str, days: i64) -> ActionResult<String> {
    Ok(iso::plus_days(iso::parse_date(date_iso)?, negate(days)?)?.to_string())
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Subtracts the given number of hours from the ISO date-time string")]
pub fn subtract_hours(datetime_iso: &str, hours: i64) -> ActionResult<String> {
    shift(iso::parse_date_time(datetime_iso)?, TimeDelta::try_hours(negate(hours)?))
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Adds the given number of minutes to the ISO date-time string")]
pub fn add_minutes(datetime_iso: &str, minutes: i64) -> ActionResult<String> {
    shift(iso::parse_date_time(datetime_iso)?, TimeDelta::try_minutes(minutes))
}

/// # Errors
///
/// Fails on malformed input or when the result leaves the calendar range.
#[action(description = "Subtracts the given number of seconds from the ISO date-time string")]
pub fn subtract_seconds(datetime_iso: &str, seconds: i64) -> ActionResult<String> {
    shift(iso::parse_date_time(datetime_iso)?, TimeDelta::try_seconds(negate(seconds)?))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the start of day (00:00:00) for the given ISO date")]
pub fn with_start_of_day(date_iso: &str) -> ActionResult<String> {
    let date = iso::parse_date(date_iso)?;
    Ok(iso::local_date_time(date.and_time(NaiveTime::MIN)))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the end of day (23:59:59.999999999) for the given ISO date")]
pub fn with_end_of_day(date_iso: &str) -> ActionResult<String> {
    let date = iso::parse_date(date_iso)?;
    let end = iso::checked(NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999), "time")?;
    Ok(iso::local_date_time(date.and_time(end)))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Calculates the number of days between two ISO dates")]
pub fn days_between(start_date_iso: &str, end_date_iso: &str) -> ActionResult<i64> {
    let start = iso::parse_date(start_date_iso)?;
    let end = iso::parse_date(end_date_iso)?;
    Ok(end.signed_duration_since(start).num_days())
}

/// Counts whole hours, truncated toward zero.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Calculates the number of hours between two ISO date-times")]
pub fn hours_between(start_date_time_iso: &str, end_date_time_iso: &str) -> ActionResult<i64> {
    Ok(between(start_date_time_iso, end_date_time_iso)?.num_hours())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Calculates the number of minutes between two ISO date-times")]
pub fn minutes_between(start_date_time_iso: &str, end_date_time_iso: &str) -> ActionResult<i64> {
    Ok(between(start_date_time_iso, end_date_time_iso)?.num_minutes())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Calculates the number of seconds between two ISO date-times")]
pub fn seconds_between(start_date_time_iso: &str, end_date_time_iso: &str) -> ActionResult<i64> {
    Ok(between(start_date_time_iso, end_date_time_iso)?.num_seconds())
}

/// Both inputs are read as UTC wall-clock times.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Calculates the number of milliseconds between two ISO date-times")]
pub fn millis_between(start_date_time_iso: &str, end_date_time_iso: &str) -> ActionResult<i64> {
    let start = iso::parse_date_time(start_date_time_iso)?.and_utc();
    let end = iso::parse_date_time(end_date_time_iso)?.and_utc();
    Ok(end.timestamp_millis() - start.timestamp_millis())
}

/// ISO-8601 duration such as `PT5H30M`, `PT-2H`, or `PT0S`.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the duration between two ISO date-times as a string (e.g., PT5H30M)")]
pub fn duration_between(start_date_time_iso: &str, end_date_time_iso: &str) -> ActionResult<String> {
    Ok(iso::duration(between(start_date_time_iso, end_date_time_iso)?))
}

/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns a breakdown of the duration between two ISO date-times (days, hours, minutes, seconds)"
)]
pub fn duration_breakdown(
    start_date_time_iso: &str,
    end_date_time_iso: &str,
) -> ActionResult<DurationBreakdown> {
    let (seconds, _) = iso::split_duration(between(start_date_time_iso, end_date_time_iso)?);
    Ok(DurationBreakdown {
        days: seconds / SECONDS_PER_DAY,
        hours: seconds / 3600 % 24,
        minutes: seconds / 60 % 60,
        seconds: seconds % 60,
    })
}
