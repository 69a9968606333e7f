//! Month boundaries and month-level calendar facts.

use chrono::{Datelike, Months, NaiveDate};

use crate::{ActionResult, action, iso};

fn first_day(date: NaiveDate) -> ActionResult<NaiveDate> {
    iso::checked(date.with_day(1), "date")
}

fn last_day(date: NaiveDate) -> ActionResult<NaiveDate> {
    iso::checked(date.with_day(iso::length_of_month(date)), "date")
}

fn start_of_month(date_iso: &str) -> ActionResult<NaiveDate> {
    first_day(iso::parse_date(date_iso)?)
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the first day of the month for the given ISO date")]
pub fn get_start_of_month(date_iso: &str) -> ActionResult<String> {
    Ok(start_of_month(date_iso)?.to_string())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the last day of the month for the given ISO date")]
pub fn get_end_of_month(date_iso: &str) -> ActionResult<String> {
    Ok(last_day(iso::parse_date(date_iso)?)?.to_string())
}

/// # Errors
///
/// Never fails for dates the system clock can produce.
#[action(description = "Returns the first day of the current month (UTC)")]
pub fn get_start_of_current_month() -> ActionResult<String> {
    Ok(first_day(super::today())?.to_string())
}

/// # Errors
///
/// Never fails for dates the system clock can produce.
#[action(description = "Returns the last day of the current month (UTC)")]
pub fn get_end_of_current_month() -> ActionResult<String> {
    Ok(last_day(super::today())?.to_string())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is the last day of its month")]
pub fn is_end_of_month(date_iso: &str) -> ActionResult<bool> {
    let date = iso::parse_date(date_iso)?;
    Ok(date.day() == iso::length_of_month(date))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns a list of all ISO dates in the month of the given date")]
pub fn get_all_dates_in_month(date_iso: &str) -> ActionResult<Vec<String>> {
    let first = start_of_month(date_iso)?;
    Ok(first
        .iter_days()
        .take(iso::length_of_month(first) as usize)
        .map(|date| date.to_string())
        .collect())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the number of days in the month of the given ISO date")]
pub fn get_length_of_month(date_iso: &str) -> ActionResult<u32> {
    Ok(iso::length_of_month(iso::parse_date(date_iso)?))
}

/// Counts the Monday-based weeks the month touches, including partial first
/// and last weeks.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the number of ISO weeks in the month of the given ISO date")]
pub fn get_week_count_in_month(date_iso: &str) -> ActionResult<i64> {
    let first = start_of_month(date_iso)?;
    let span = last_day(first)?.signed_duration_since(iso::monday_of(first)?);
    Ok(span.num_days() / 7 + 1)
}

/// # Errors
///
/// Fails on malformed input or at the start of the calendar range.
#[action(description = "Returns the last day of the previous month for the given ISO date")]
pub fn get_end_of_previous_month(date_iso: &str) -> ActionResult<String> {
    let previous = iso::checked(start_of_month(date_iso)?.pred_opt(), "date")?;
    Ok(previous.to_string())
}

/// # Errors
///
/// Fails on malformed input or at the end of the calendar range.
#[action(description = "Returns the first day of the next month for the given ISO date")]
pub fn get_start_of_next_month(date_iso: &str) -> ActionResult<String> {
    let next = start_of_month(date_iso)?.checked_add_months(Months::new(1));
    Ok(iso::checked(next, "date")?.to_string())
}

/// `day` is clamped to the month, so `0` gives the first and `999` the last
/// day.
///
/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns the ISO date of a specific day in the same month as the given date (e.g., 15th)"
)]
pub fn get_specific_day_in_month(date_iso: &str, day: i32) -> ActionResult<String> {
    let date = iso::parse_date(date_iso)?;
    let length = iso::length_of_month(date);
    let day = u32::try_from(day).map_or(1, |day| day.clamp(1, length));
    Ok(iso::checked(date.with_day(day), "date")?.to_string())
}
