//! Comparisons between dates and against the current UTC date.

use chrono::{Datelike, NaiveDate, Timelike, Utc, Weekday};

use crate::pattern::Pattern;
use crate::{ActionResult, action, iso};

fn dates(first: &str, second: &str) -> ActionResult<(NaiveDate, NaiveDate)> {
    Ok((iso::parse_date(first)?, iso::parse_date(second)?))
}

fn on_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the first ISO date is before the second one")]
pub fn is_before(date1: &str, date2: &str) -> ActionResult<bool> {
    let (first, second) = dates(date1, date2)?;
    Ok(first < second)
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the first ISO date is after the second one")]
pub fn is_after(date1: &str, date2: &str) -> ActionResult<bool> {
    let (first, second) = dates(date1, date2)?;
    Ok(first > second)
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if two ISO dates are the same day")]
pub fn is_same_day(date1: &str, date2: &str) -> ActionResult<bool> {
    let (first, second) = dates(date1, date2)?;
    Ok(first == second)
}

/// Both bounds are inclusive.
///
/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is between start and end (inclusive)")]
pub fn is_between(target: &str, start: &str, end: &str) -> ActionResult<bool> {
    let target = iso::parse_date(target)?;
    let (start, end) = dates(start, end)?;
    Ok((start..=end).contains(&target))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if two ISO dates are in the same month and year")]
pub fn is_same_month(date1: &str, date2: &str) -> ActionResult<bool> {
    let (first, second) = dates(date1, date2)?;
    Ok(first.year() == second.year() && first.month() == second.month())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if two ISO dates are in the same year")]
pub fn is_same_year(date1: &str, date2: &str) -> ActionResult<bool> {
    let (first, second) = dates(date1, date2)?;
    Ok(first.year() == second.year())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is today in UTC")]
pub fn is_today(date_iso: &str) -> ActionResult<bool> {
    Ok(iso::parse_date(date_iso)? == super::today())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is in the future (after today, UTC)")]
pub fn is_future_date(date_iso: &str) -> ActionResult<bool> {
    Ok(iso::parse_date(date_iso)? > super::today())
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is in the past (before today, UTC)")]
pub fn is_past_date(date_iso: &str) -> ActionResult<bool> {
    Ok(iso::parse_date(date_iso)? < super::today())
}

/// Whether the current UTC hour is before noon.
#[action(description = "Returns true if the current UTC time is before 12:00 (AM)")]
pub fn is_am_now() -> bool {
    Utc::now().hour() < 12
}

/// Whether the current UTC hour is noon or later.
#[action(description = "Returns true if the current UTC time is 12:00 or later (PM)")]
pub fn is_pm_now() -> bool {
    Utc::now().hour() >= 12
}

/// Gregorian leap-year test.
#[action(description = "Returns true if the given year is a leap year")]
pub fn is_leap_year(year: i32) -> bool {
    iso::is_leap_year(year)
}

/// Text that does not match the pattern yields `false`.
///
/// # Errors
///
/// Fails with [`crate::ActionError::InvalidPattern`] when the pattern itself
/// is malformed.
#[action(
    description = "Returns true if the given date string is valid according to the given pattern (e.g., yyyy-MM-dd)"
)]
pub fn is_valid_date(date_str: &str, pattern: &str) -> ActionResult<bool> {
    let pattern = Pattern::compile(pattern)?;
    match pattern.parse_date(date_str) {
        Ok(_) => Ok(true),
        Err(err) if err.is_parse() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Weekends only; holidays are not considered.
///
/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Returns true if the given ISO date is a weekday (Mon-Fri). Currently only supports weekends, not holidays."
)]
pub fn is_business_day(date_iso: &str) -> ActionResult<bool> {
    Ok(!on_weekend(iso::parse_date(date_iso)?))
}

/// # Errors
///
/// Fails on malformed input.
#[action(description = "Returns true if the given ISO date is a weekend (Saturday or Sunday)")]
pub fn is_weekend(date_iso: &str) -> ActionResult<bool> {
    Ok(on_weekend(iso::parse_date(date_iso)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionError;

    #[test]
    fn ordering() {
        assert!(is_before("2024-01-01", "2025-01-01").unwrap());
        assert!(!is_before("2025-01-01", "2025-01-01").unwrap());
        assert!(is_after("2025-01-02", "2025-01-01").unwrap());
        assert!(!is_after("2025-01-01", "2025-01-01").unwrap());
    }

    #[test]
    fn same_day_and_inclusive_range() {
        assert!(is_same_day("2025-04-17", "2025-04-17").unwrap());
        assert!(!is_same_day("2025-04-17", "2025-04-18").unwrap());

        assert!(is_between("2025-04-17", "2025-04-01", "2025-04-30").unwrap());
        assert!(is_between("2025-04-01", "2025-04-01", "2025-04-30").unwrap());
        assert!(is_between("2025-04-30", "2025-04-01", "2025-04-30").unwrap());
        assert!(!is_between("2025-05-01", "2025-04-01", "2025-04-30").unwrap());
    }

    #[test]
    fn month_and_year_fields() {
        assert!(is_same_month("2025-04-01", "2025-04-30").unwrap());
        assert!(!is_same_month("2025-04-01", "2025-05-01").unwrap());
        assert!(!is_same_month("2024-04-01", "2025-04-01").unwrap());

        assert!(is_same_year("2025-04-01", "2025-12-31").unwrap());
        assert!(!is_same_year("2025-12-31", "2024-12-31").unwrap());
    }

    #[test]
    fn relative_to_today() {
        let today = super::super::today();
        let tomorrow = today.succ_opt().unwrap().to_string();
        let yesterday = today.pred_opt().unwrap().to_string();
        let today = today.to_string();

        assert!(is_today(&today).unwrap());
        assert!(is_future_date(&tomorrow).unwrap());
        assert!(is_past_date(&yesterday).unwrap());
        assert!(!is_today(&tomorrow).unwrap());
        assert!(!is_future_date(&yesterday).unwrap());
        assert!(!is_past_date(&tomorrow).unwrap());
    }

    #[test]
    fn am_and_pm_are_complementary() {
        assert_ne!(is_am_now(), is_pm_now());
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn validates_against_pattern() {
        assert!(is_valid_date("2025-04-17", "yyyy-MM-dd").unwrap());
        assert!(!is_valid_date("2025/04/17", "yyyy-MM-dd").unwrap());
        assert!(!is_valid_date("invalid-date", "yyyy-MM-dd").unwrap());
        assert!(!is_valid_date("2025-02-30", "yyyy-MM-dd").unwrap());
        assert!(matches!(
            is_valid_date("2025-04-17", "yyyy-MM-dd qqq"),
            Err(ActionError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn business_days_and_weekends() {
        assert!(is_business_day("2025-04-17").unwrap());
        assert!(!is_business_day("2025-04-19").unwrap());
        assert!(is_weekend("2025-04-20").unwrap());
        assert!(!is_weekend("2025-04-17").unwrap());
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(is_before("bad-date", "2025-01-01").unwrap_err().is_parse());
        assert!(is_between("2025-04-17", "start", "2025-04-30").unwrap_err().is_parse());
        assert!(is_same_day("2025-13-01", "2025-04-17").unwrap_err().is_parse());
    }

    #[test]
    fn loosely_shaped_input_is_rejected() {
        assert!(is_before("2025-4-7", "2025-04-08").unwrap_err().is_parse());
        assert!(is_after(" 2025-04-17", "2025-04-08").unwrap_err().is_parse());
        assert!(is_same_day("+2025-04-17", "2025-04-17").unwrap_err().is_parse());

        assert!(!is_valid_date("2025/4/17", "yyyy/MM/dd").unwrap());
        assert!(!is_valid_date(" 2025/04/17", "yyyy/MM/dd").unwrap());
        assert!(!is_valid_date("+2025/04/17", "yyyy/MM/dd").unwrap());
        assert!(is_valid_date("2025/4/17", "yyyy/M/dd").unwrap());
    }
}
