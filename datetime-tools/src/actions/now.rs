//! Actions that read the system clock.

use chrono::{Datelike, Timelike, Utc};
use serde::Serialize;

use crate::pattern::Pattern;
use crate::tz::{self, Zone};
use crate::{ActionResult, action, iso};

/// Components of the current UTC time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeParts {
    /// Hour of day, `0..=23`.
    pub hour: u32,
    /// Minute of hour.
    pub minute: u32,
    /// Second of minute.
    pub second: u32,
    /// Upper-case day name, e.g. `THURSDAY`.
    pub day_of_week: String,
}

/// Current UTC instant, e.g. `2025-04-17T02:25:00.123Z`.
#[action(
    description = "Returns the current time in UTC in ISO-8601 format (e.g., 2025-04-17T02:25:00Z)"
)]
pub fn now_utc_iso() -> String {
    format!("{}Z", iso::local_date_time(Utc::now().naive_utc()))
}

/// Current instant in a zone, with the region suffix when applicable.
///
/// # Errors
///
/// Fails with [`crate::ActionError::UnknownZone`] for unknown identifiers.
#[action(
    description = "Returns the current time in the specified time zone in ISO-8601 format (e.g., Asia/Seoul)"
)]
pub fn now_in_zone(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(zone.render(zone.at(Utc::now())))
}

/// Current UTC date.
#[action(description = "Returns the current date in UTC in ISO format (yyyy-MM-dd)")]
pub fn today_iso() -> String {
    super::today().to_string()
}

/// Current date in a zone.
///
/// # Errors
///
/// Fails with [`crate::ActionError::UnknownZone`] for unknown identifiers.
#[action(description = "Returns the current date in the given time zone in ISO format (yyyy-MM-dd)")]
pub fn today_in_zone(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(zone.at(Utc::now()).date_naive().to_string())
}

/// Milliseconds since the Unix epoch.
#[action(description = "Returns the current epoch time in milliseconds")]
pub fn current_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seconds since the Unix epoch.
#[action(description = "Returns the current epoch time in seconds")]
pub fn current_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Current UTC date-time rendered with `pattern`.
///
/// # Errors
///
/// Fails with [`crate::ActionError::InvalidPattern`] when the pattern is
/// malformed or asks for zone fields.
#[action(
    description = "Returns the current date and time formatted using the given pattern (e.g., yyyy/MM/dd HH:mm)"
)]
pub fn now_formatted(pattern: &str) -> ActionResult<String> {
    Pattern::compile(pattern)?.format_date_time(&Utc::now().naive_utc())
}

/// Current instant in the `UTC` region.
#[action(description = "Returns the current UTC date-time with its zone ID as a string")]
pub fn now_utc_zoned() -> String {
    let zone = Zone::Region(chrono_tz::UTC);
    zone.render_compact(zone.at(Utc::now()))
}

/// Hour, minute, second, and day name of the current UTC time.
#[action(description = "Returns current UTC time components (hour, minute, second, dayOfWeek)")]
pub fn current_time_parts_utc() -> TimeParts {
    let now = Utc::now();
    TimeParts {
        hour: now.hour(),
        minute: now.minute(),
        second: now.second(),
        day_of_week: iso::day_name(now.weekday()).to_owned(),
    }
}

/// Offset currently in effect for a zone.
///
/// # Errors
///
/// Fails with [`crate::ActionError::UnknownZone`] for unknown identifiers.
#[action(description = "Returns the UTC offset for the given zone ID (e.g., +09:00)")]
pub fn current_utc_offset(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(iso::offset_id(zone.offset_at(Utc::now())))
}

/// ISO week number of today's UTC date.
#[action(description = "Returns the current ISO week number of the year (UTC)")]
pub fn week_of_year_utc() -> u32 {
    super::today().iso_week().week()
}

/// Day of year of today's UTC date.
#[action(description = "Returns the current day of the year (1 to 365 or 366) in UTC")]
pub fn day_of_year_utc() -> u32 {
    super::today().ordinal()
}

/// Sorted IANA zone identifiers.
#[action(description = "Returns a sorted list of all available time zone IDs")]
pub fn available_zone_ids() -> Vec<&'static str> {
    tz::available_ids()
}
