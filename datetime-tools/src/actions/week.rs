//! ISO-8601 week calculations.
//!
//! Weeks start on Monday; week 1 of a year is the week holding its first
//! Thursday.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{ActionError, ActionResult, action, iso};

/// Minimal number of days the first week of a month must have.
const MIN_DAYS_IN_FIRST_WEEK: i64 = 4;

fn date_of_week(week: i32, year: i32, day: Weekday) -> ActionResult<NaiveDate> {
    let number = u32::try_from(week).ok();
    number
        .and_then(|number| NaiveDate::from_isoywd_opt(year, number, day))
        .ok_or_else(|| ActionError::out_of_range(format!("week {week} does not exist in {year}")))
}

/// Week-of-month of `date` with Monday-started weeks; a leading partial week
/// with fewer than four days counts as week 0.
fn week_of_month(date: NaiveDate) -> i64 {
    let day = i64::from(date.day());
    let weekday = i64::from(date.weekday().number_from_monday());
    let week_start = (day - weekday).rem_euclid(7);
    let offset = if week_start + 1 > MIN_DAYS_IN_FIRST_WEEK {
        7 - week_start
    } else {
        -week_start
    };
    (7 + offset + day - 1) / 7
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the ISO week number (1–53) of the year for the given ISO date")]
pub fn get_week_of_year(date_iso: &str) -> ActionResult<u32> {
    Ok(iso::parse_date(date_iso)?.iso_week().week())
}

/// ISO week number of today's UTC date.
#[action(description = "Returns the current ISO week number of the year")]
pub fn get_current_week_of_year() -> u32 {
    super::today().iso_week().week()
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the start date (Monday) of the week for the given ISO date")]
pub fn get_start_of_week(date_iso: &str) -> ActionResult<String> {
    Ok(iso::monday_of(iso::parse_date(date_iso)?)?.to_string())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns the end date (Sunday) of the week for the given ISO date")]
pub fn get_end_of_week(date_iso: &str) -> ActionResult<String> {
    let monday = iso::monday_of(iso::parse_date(date_iso)?)?;
    Ok(iso::plus_days(monday, 6)?.to_string())
}

/// Compares both the week number and the week-based year.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the two dates fall in the same ISO week of the year")]
pub fn is_same_week(date_iso1: &str, date_iso2: &str) -> ActionResult<bool> {
    let first = iso::parse_date(date_iso1)?;
    let second = iso::parse_date(date_iso2)?;
    Ok(first.iso_week() == second.iso_week())
}

/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns the day of the week for the first day of the week that includes the given ISO date"
)]
pub fn get_weekday_of_first_day(date_iso: &str) -> ActionResult<&'static str> {
    let monday = iso::monday_of(iso::parse_date(date_iso)?)?;
    Ok(iso::day_name(monday.weekday()))
}

/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns a list of ISO date strings for all days in the week that includes the given ISO date"
)]
pub fn get_all_dates_of_week(date_iso: &str) -> ActionResult<Vec<String>> {
    let monday = iso::monday_of(iso::parse_date(date_iso)?)?;
    Ok(monday.iter_days().take(7).map(|date| date.to_string()).collect())
}

/// # Errors
///
/// Fails with [`ActionError::OutOfRange`] when `week` does not exist in
/// `year`.
#[action(
    description = "Returns the start date (Monday) of the given ISO week number and year; week 53 is rejected for years with 52 ISO weeks"
)]
pub fn get_start_of_week_by_number(week: i32, year: i32) -> ActionResult<String> {
    Ok(date_of_week(week, year, Weekday::Mon)?.to_string())
}

/// # Errors
///
/// Fails with [`ActionError::OutOfRange`] when `week` does not exist in
/// `year`.
#[action(
    description = "Returns the end date (Sunday) of the given ISO week number and year; week 53 is rejected for years with 52 ISO weeks"
)]
pub fn get_end_of_week_by_number(week: i32, year: i32) -> ActionResult<String> {
    Ok(date_of_week(week, year, Weekday::Sun)?.to_string())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date falls in the last ISO week of its month")]
pub fn is_last_week_of_month(date_iso: &str) -> ActionResult<bool> {
    let date = iso::parse_date(date_iso)?;
    let last = iso::checked(date.with_day(iso::length_of_month(date)), "date")?;
    Ok(week_of_month(date) == week_of_month(last))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the ISO week number of the given ISO date is even")]
pub fn is_even_week(date_iso: &str) -> ActionResult<bool> {
    Ok(iso::parse_date(date_iso)?.iso_week().week() % 2 == 0)
}

/// # Errors
///
/// Fails with [`ActionError::OutOfRange`] when `week` does not exist in
/// `year` or `weekday_index` is outside `0..=6`.
#[action(
    description = "Returns the ISO date for a given ISO week number, year, and weekday index (0=Monday, 6=Sunday); week 53 is rejected for years with 52 ISO weeks"
)]
pub fn get_date_from_week_and_day(week: i32, year: i32, weekday_index: i32) -> ActionResult<String> {
    let day = usize::try_from(weekday_index)
        .ok()
        .and_then(|index| iso::WEEK.get(index).copied())
        .ok_or_else(|| ActionError::out_of_range(format!("weekday index {weekday_index}")))?;
    Ok(date_of_week(week, year, day)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_numbers() {
        assert_eq!(get_week_of_year("2024-01-01").unwrap(), 1);
        assert_eq!(get_week_of_year("2021-01-03").unwrap(), 53);
        assert!((1..=53).contains(&get_current_week_of_year()));
    }

    #[test]
    fn week_boundaries() {
        assert_eq!(get_start_of_week("2025-04-17").unwrap(), "2025-04-14");
        assert_eq!(get_end_of_week("2025-04-17").unwrap(), "2025-04-20");
        assert_eq!(get_start_of_week("2025-04-14").unwrap(), "2025-04-14");
        assert_eq!(get_end_of_week("2025-04-20").unwrap(), "2025-04-20");
    }

    #[test]
    fn same_week() {
        assert!(is_same_week("2025-04-14", "2025-04-20").unwrap());
        assert!(!is_same_week("2025-04-14", "2025-04-21").unwrap());
        assert!(!is_same_week("2024-04-15", "2025-04-14").unwrap());
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(get_weekday_of_first_day("2025-04-17").unwrap(), "MONDAY");
        let dates = get_all_dates_of_week("2025-04-17").unwrap();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates.first().unwrap(), "2025-04-14");
        assert_eq!(dates.last().unwrap(), "2025-04-20");
    }

    #[test]
    fn weeks_by_number() {
        assert_eq!(get_start_of_week_by_number(2, 2025).unwrap(), "2025-01-06");
        assert_eq!(get_end_of_week_by_number(2, 2025).unwrap(), "2025-01-12");
        assert_eq!(get_start_of_week_by_number(52, 2023).unwrap(), "2023-12-25");
        assert_eq!(get_start_of_week_by_number(1, 2025).unwrap(), "2024-12-30");

        assert!(get_start_of_week_by_number(0, 2025).is_err());
        assert!(get_start_of_week_by_number(53, 2025).is_err());
        assert_eq!(get_start_of_week_by_number(53, 2020).unwrap(), "2020-12-28");
    }

    #[test]
    fn week_53_limit_is_advertised() {
        let registry =
            crate::registry::ActionRegistry::discover("datetime_tools::actions::week").unwrap();
        for name in [
            "getStartOfWeekByNumber",
            "getEndOfWeekByNumber",
            "getDateFromWeekAndDay",
        ] {
            let description = registry.get(name).unwrap().spec().description();
            assert!(description.contains("week 53 is rejected"), "{name}");
        }
        assert!(get_end_of_week_by_number(53, 2025).is_err());
        assert!(get_date_from_week_and_day(53, 2025, 0).is_err());
        assert_eq!(get_date_from_week_and_day(53, 2026, 0).unwrap(), "2026-12-28");
    }

    #[test]
    fn last_week_of_month() {
        assert!(is_last_week_of_month("2025-04-30").unwrap());
        assert!(is_last_week_of_month("2025-04-28").unwrap());
        assert!(!is_last_week_of_month("2025-04-15").unwrap());
        assert!(!is_last_week_of_month("2025-04-27").unwrap());
    }

    #[test]
    fn even_weeks() {
        assert!(is_even_week("2025-04-14").unwrap());
        assert!(is_even_week("2025-04-15").unwrap());
        assert!(!is_even_week("2025-04-21").unwrap());
    }

    #[test]
    fn date_from_week_and_day() {
        assert_eq!(get_date_from_week_and_day(2, 2025, 0).unwrap(), "2025-01-06");
        assert_eq!(get_date_from_week_and_day(2, 2025, 6).unwrap(), "2025-01-12");
        assert_eq!(get_date_from_week_and_day(2, 2025, 2).unwrap(), "2025-01-08");
        assert!(get_date_from_week_and_day(2, 2025, 7).is_err());
        assert!(get_date_from_week_and_day(2, 2025, -1).is_err());

        for week in 1..=52 {
            let date = get_date_from_week_and_day(week, 2025, 0).unwrap();
            assert_eq!(date.len(), 10);
        }
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(get_week_of_year("bad-date").unwrap_err().is_parse());
        assert!(get_start_of_week("2025-13-01").unwrap_err().is_parse());
    }
}
