//! Time-zone conversion and zone information.
//!
//! Zone ids are IANA region names (`Asia/Seoul`), `Z`, fixed offsets
//! (`+09:00`), or offsets behind a `UTC`, `GMT`, or `UT` prefix (`GMT+9`).
//! Converted values are rendered with their offset and, for named zones, the
//! bracketed zone id: `2025-04-17T03:00:00Z[UTC]`.

use chrono::Utc;

use crate::tz::Zone;
use crate::{ActionResult, action, iso};

/// Local times inside a daylight-saving gap are moved forward by the gap;
/// ambiguous local times use the earlier offset.
///
/// # Errors
///
/// Fails on malformed input or an unknown zone id.
#[action(description = "Converts the given ISO date-time from the source time zone to the target time zone")]
pub fn convert_zone(datetime_iso: &str, from_zone: &str, to_zone: &str) -> ActionResult<String> {
    let local = iso::parse_date_time(datetime_iso)?;
    let from: Zone = from_zone.parse()?;
    let to: Zone = to_zone.parse()?;
    let instant = from.resolve(local)?.with_timezone(&Utc);
    Ok(to.render(to.at(instant)))
}

/// # Errors
///
/// Fails on malformed input or an unknown zone id.
#[action(description = "Converts the given ISO date-time from the source time zone to UTC")]
pub fn to_utc(datetime_iso: &str, from_zone: &str) -> ActionResult<String> {
    convert_zone(datetime_iso, from_zone, "UTC")
}

/// # Errors
///
/// Fails on an unknown zone id.
#[action(description = "Converts the current UTC time to the given time zone (ISO-8601 format)")]
pub fn utc_now_to_zone(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(zone.render(zone.at(Utc::now())))
}

/// # Errors
///
/// Fails on an unknown zone id.
#[action(description = "Returns the current UTC offset of the given time zone (e.g., +09:00)")]
pub fn get_zone_offset(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(iso::offset_id(zone.offset_at(Utc::now())))
}

/// Whether `zone_id` names a region or offset this toolkit can resolve.
#[action(description = "Checks whether the given time zone ID is valid")]
pub fn is_valid_zone_id(zone_id: &str) -> bool {
    zone_id.parse::<Zone>().is_ok()
}

/// Fixed offsets never observe daylight-saving time.
///
/// # Errors
///
/// Fails on an unknown zone id.
#[action(description = "Returns true if the given time zone is currently in daylight saving time (DST)")]
pub fn is_dst_active(zone_id: &str) -> ActionResult<bool> {
    let zone: Zone = zone_id.parse()?;
    Ok(zone.is_dst(Utc::now()))
}

/// Difference between the current offsets, in whole hours truncated toward
/// zero.
///
/// # Errors
///
/// Fails on an unknown zone id.
#[action(description = "Returns the hour difference between two time zones at the current time")]
pub fn zone_offset_diff(zone_id1: &str, zone_id2: &str) -> ActionResult<i64> {
    let first: Zone = zone_id1.parse()?;
    let second: Zone = zone_id2.parse()?;
    let now = Utc::now();
    let diff = first.offset_at(now).local_minus_utc() - second.offset_at(now).local_minus_utc();
    Ok(i64::from(diff / 3600))
}

/// # Errors
///
/// Fails on an unknown zone id.
#[action(description = "Returns the current local time in the given time zone (HH:mm:ss)")]
pub fn time_in_zone(zone_id: &str) -> ActionResult<String> {
    let zone: Zone = zone_id.parse()?;
    Ok(iso::local_time(zone.at(Utc::now()).time()))
}
