//! Pattern-based formatting and parsing.

use chrono::Datelike;

use crate::pattern::{self, Pattern};
use crate::{ActionResult, action, iso};

/// # Errors
///
/// Fails on malformed input or an invalid pattern.
#[action(
    description = "Formats the given LocalDateTime ISO string using the given pattern (e.g., yyyy/MM/dd HH:mm)"
)]
pub fn format_local_date_time(datetime_iso: &str, pattern: &str) -> ActionResult<String> {
    let value = iso::parse_date_time(datetime_iso)?;
    Pattern::compile(pattern)?.format_date_time(&value)
}

/// Patterns that ask for time-of-day fields are rejected.
///
/// # Errors
///
/// Fails on malformed input or an invalid pattern.
#[action(
    description = "Formats the given LocalDate ISO string using the given pattern (e.g., MM-dd-yyyy)"
)]
pub fn format_local_date(date_iso: &str, pattern: &str) -> ActionResult<String> {
    let value = iso::parse_date(date_iso)?;
    Pattern::compile(pattern)?.format_date(&value)
}

/// Parses `datetime` with `pattern` and renders the ISO local date-time with
/// seconds, e.g. `2025-04-17T10:00:00`.
///
/// # Errors
///
/// Fails when the text does not match the pattern or the pattern is invalid.
#[action(description = "Parses the given date-time string with the given pattern into ISO-8601 format")]
pub fn parse_to_iso(datetime: &str, pattern: &str) -> ActionResult<String> {
    let value = Pattern::compile(pattern)?.parse_date_time(datetime)?;
    Ok(iso::full_local_date_time(value))
}

/// Like [`parse_to_iso`], but text that does not match yields `None`.
///
/// # Errors
///
/// An invalid pattern is still an error.
#[action(
    description = "Safely parses the date-time string using the given pattern. Returns null if parsing fails."
)]
pub fn safe_parse_to_iso(datetime: &str, pattern: &str) -> ActionResult<Option<String>> {
    match parse_to_iso(datetime, pattern) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_parse() => Ok(None),
        Err(err) => Err(err),
    }
}

/// # Errors
///
/// Fails on malformed input.
#[action(
    description = "Parses the given ISO date string to a LocalDate and returns the day of week (e.g., MONDAY)"
)]
pub fn parse_day_of_week(date_iso: &str) -> ActionResult<&'static str> {
    Ok(iso::day_name(iso::parse_date(date_iso)?.weekday()))
}

/// Any failure, including an invalid pattern, yields `false`.
#[action(
    description = "Checks if the given date string is valid with the given pattern (e.g., 2025/04/17 with yyyy/MM/dd)"
)]
pub fn is_valid_date_format(date_str: &str, pattern: &str) -> bool {
    Pattern::compile(pattern).is_ok_and(|pattern| pattern.parse_date(date_str).is_ok())
}

/// Month and day names follow `locale_tag` (`en-US`, `fr-FR`); unknown tags
/// fall back to English.
///
/// # Errors
///
/// Fails on malformed input or an invalid pattern.
#[action(
    description = "Formats the given ISO date-time string using the given pattern and locale (e.g., en-US, fr-FR)"
)]
pub fn format_with_locale(date_time_iso: &str, pattern: &str, locale_tag: &str) -> ActionResult<String> {
    let pattern = Pattern::compile(pattern)?;
    let value = iso::parse_date_time(date_time_iso)?;
    pattern.format_localized(&value, pattern::locale(locale_tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionError;

    #[test]
    fn formats_date_times() {
        assert_eq!(
            format_local_date_time("2025-04-17T10:00:00", "yyyy/MM/dd HH:mm").unwrap(),
            "2025/04/17 10:00"
        );
        assert!(format_local_date_time("invalid", "yyyy/MM/dd").unwrap_err().is_parse());
    }

    #[test]
    fn iso_pattern_reproduces_input() {
        let datetime = "2025-04-17T23:59:59";
        for _ in 0..1_000 {
            assert_eq!(
                format_local_date_time(datetime, "yyyy-MM-dd'T'HH:mm:ss").unwrap(),
                datetime
            );
        }
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_local_date("2025-04-17", "MM-dd-yyyy").unwrap(), "04-17-2025");
        assert!(format_local_date("2025/04/17", "yyyy-MM-dd").unwrap_err().is_parse());
        assert!(matches!(
            format_local_date("2025-04-17", "yyyy HH"),
            Err(ActionError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn parses_to_iso() {
        assert_eq!(
            parse_to_iso("17-04-2025 10:00:00", "dd-MM-yyyy HH:mm:ss").unwrap(),
            "2025-04-17T10:00:00"
        );
        assert!(parse_to_iso("17/04/2025", "yyyy-MM-dd").unwrap_err().is_parse());
        assert!(parse_to_iso("17-04-2025 1:00:00", "dd-MM-yyyy HH:mm:ss").unwrap_err().is_parse());
    }

    #[test]
    fn safe_parse_swallows_only_parse_errors() {
        assert_eq!(
            safe_parse_to_iso("17-04-2025 10:00:00", "dd-MM-yyyy HH:mm:ss").unwrap(),
            Some("2025-04-17T10:00:00".to_owned())
        );
        assert_eq!(safe_parse_to_iso("invalid-date", "yyyy-MM-dd").unwrap(), None);
        assert!(safe_parse_to_iso("2025", "qqqq").is_err());
    }

    #[test]
    fn day_of_week_from_iso() {
        assert_eq!(parse_day_of_week("2025-04-17").unwrap(), "THURSDAY");
        assert!(parse_day_of_week("2025/04/17").unwrap_err().is_parse());
    }

    #[test]
    fn validity_never_errors() {
        assert!(is_valid_date_format("2025/04/17", "yyyy/MM/dd"));
        assert!(!is_valid_date_format("17-04-2025", "yyyy/MM/dd"));
        assert!(!is_valid_date_format("not-a-date", "yyyy-MM-dd"));
        assert!(!is_valid_date_format("2025-04-17", "qqqq"));
        assert!(!is_valid_date_format("2025/4/17", "yyyy/MM/dd"));
    }

    #[test]
    fn localized_month_names() {
        assert_eq!(
            format_with_locale("2025-04-17T00:00:00", "MMMM", "en-US").unwrap(),
            "April"
        );
        assert_eq!(
            format_with_locale("2025-04-17T00:00:00", "MMMM", "fr-FR")
                .unwrap()
                .to_lowercase(),
            "avril"
        );
    }
}
