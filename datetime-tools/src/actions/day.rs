//! Day-of-week lookups and conversions.
//!
//! Day indexes count from Monday (`0`) to Sunday (`6`); day names are the
//! upper-case English names (`MONDAY`).

use chrono::{Datelike, Weekday};

use crate::{ActionError, ActionResult, action, iso};

/// Parses a full or three-letter English day name, ignoring case and
/// surrounding whitespace.
pub(crate) fn weekday(day_name: &str) -> ActionResult<Weekday> {
    day_name
        .trim()
        .parse::<Weekday>()
        .map_err(|err| ActionError::parse(day_name, err))
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the day of the week (e.g., MONDAY) for the given ISO date")]
pub fn get_day_of_week(date_iso: &str) -> ActionResult<&'static str> {
    Ok(iso::day_name(iso::parse_date(date_iso)?.weekday()))
}

/// Day name of today's UTC date.
#[action(description = "Returns the current day of the week (UTC) as a string (e.g., TUESDAY)")]
pub fn get_today_day_of_week() -> &'static str {
    iso::day_name(super::today().weekday())
}

/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns the index of the day of week for the given ISO date (0=Monday, 6=Sunday)"
)]
pub fn get_day_of_week_index(date_iso: &str) -> ActionResult<u32> {
    Ok(iso::parse_date(date_iso)?.weekday().num_days_from_monday())
}

/// Day index of today's UTC date.
#[action(description = "Returns the index of today's day of week (0=Monday, 6=Sunday)")]
pub fn get_today_day_index() -> u32 {
    super::today().weekday().num_days_from_monday()
}

/// # Errors
///
/// Fails when the name is not a day of the week.
#[action(description = "Returns true if the given day name is a weekend (SATURDAY or SUNDAY)")]
pub fn is_weekend_day(day_name: &str) -> ActionResult<bool> {
    Ok(is_weekend(weekday(day_name)?))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date falls on a weekend (Saturday or Sunday)")]
pub fn is_weekend_date(date_iso: &str) -> ActionResult<bool> {
    Ok(is_weekend(iso::parse_date(date_iso)?.weekday()))
}

/// # Errors
///
/// Fails when the name is not a day of the week.
#[action(description = "Returns true if the given day name is a weekday (Monday to Friday)")]
pub fn is_weekday(day_name: &str) -> ActionResult<bool> {
    Ok(!is_weekend(weekday(day_name)?))
}

/// Accepts `Mon`, `monday`, ` Friday ` and similar spellings.
///
/// # Errors
///
/// Fails when the name is not a day of the week.
#[action(
    description = "Normalizes a day name string to a standard DayOfWeek enum (e.g., Mon -> MONDAY)"
)]
pub fn normalize_day_name(day_name: &str) -> ActionResult<&'static str> {
    Ok(iso::day_name(weekday(day_name)?))
}

/// # Errors
///
/// Fails when the name is not a day of the week.
#[action(description = "Converts a day name to its index (0=Monday, 6=Sunday)")]
pub fn day_name_to_index(day_name: &str) -> ActionResult<u32> {
    Ok(weekday(day_name)?.num_days_from_monday())
}

/// Indexes wrap around in both directions: `7` is Monday, `-1` is Sunday.
#[action(description = "Converts an index (0=Monday, 6=Sunday) to the corresponding day name")]
pub fn index_to_day_name(index: i32) -> &'static str {
    iso::day_name(iso::WEEK[index.rem_euclid(7).unsigned_abs() as usize])
}

/// # Errors
///
/// Fails when the offset leaves the calendar range.
#[action(description = "Returns the day of the week N days after today (e.g., MONDAY)")]
pub fn get_day_after_today(offset: i64) -> ActionResult<&'static str> {
    Ok(iso::day_name(iso::plus_days(super::today(), offset)?.weekday()))
}
