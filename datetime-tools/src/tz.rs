//! Time-zone identifiers: IANA regions and fixed offsets.

use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::{OffsetComponents, Tz};

use crate::iso;
use crate::{ActionError, ActionResult};

const MAX_OFFSET_HOURS: i32 = 18;

/// Prefixes that may precede a fixed offset (`UTC+09:00`, `GMT+9`, `UT-05`).
/// `UTC` and `GMT` are checked before `UT`.
const OFFSET_PREFIXES: [&str; 3] = ["UTC", "GMT", "UT"];

/// A resolved zone identifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Zone {
    /// IANA region such as `Asia/Seoul` or `UTC`.
    Region(Tz),
    /// Fixed offset such as `+09:00` or `Z`.
    Fixed(FixedOffset),
    /// Fixed offset named with a prefix, such as `UTC+09:00`.
    Prefixed {
        /// One of `UTC`, `GMT`, or `UT`.
        prefix: &'static str,
        /// Offset following the prefix; zero for a bare prefix.
        offset: FixedOffset,
    },
}

impl Zone {
    /// Offset in effect at the given instant.
    pub(crate) fn offset_at(self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Region(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
            Self::Fixed(offset) | Self::Prefixed { offset, .. } => offset,
        }
    }

    /// The instant viewed in this zone.
    pub(crate) fn at(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    /// Attaches this zone to a local date-time.
    ///
    /// Overlaps resolve to the earlier offset; times inside a gap move
    /// forward by the length of the gap.
    pub(crate) fn resolve(self, local: NaiveDateTime) -> ActionResult<DateTime<FixedOffset>> {
        let tz = match self {
            Self::Fixed(offset) | Self::Prefixed { offset, .. } => {
                let utc = local
                    .checked_sub_offset(offset)
                    .ok_or_else(|| ActionError::out_of_range("date-time exceeds the supported range"))?;
                return Ok(utc.and_utc().with_timezone(&offset));
            }
            Self::Region(tz) => tz,
        };

        match tz.from_local_datetime(&local) {
            LocalResult::Single(value) => Ok(value.fixed_offset()),
            LocalResult::Ambiguous(first, second) => Ok(first.min(second).fixed_offset()),
            LocalResult::None => {
                let day = TimeDelta::days(1);
                let probe = |naive: Option<NaiveDateTime>| {
                    naive
                        .map(|naive| tz.offset_from_utc_datetime(&naive).fix())
                        .ok_or_else(|| {
                            ActionError::out_of_range("date-time exceeds the supported range")
                        })
                };
                let before = probe(local.checked_sub_signed(day))?;
                let after = probe(local.checked_add_signed(day))?;
                let utc = iso::checked(local.checked_sub_offset(before), "date-time")?;
                Ok(utc.and_utc().with_timezone(&after))
            }
        }
    }

    /// Whether daylight-saving time is in effect at the given instant.
    pub(crate) fn is_dst(self, instant: DateTime<Utc>) -> bool {
        match self {
            Self::Region(tz) => {
                tz.offset_from_utc_datetime(&instant.naive_utc()).dst_offset() != TimeDelta::zero()
            }
            Self::Fixed(_) | Self::Prefixed { .. } => false,
        }
    }

    /// Zone-aware rendering: `2025-04-17T12:00:00+09:00[Asia/Seoul]`.
    pub(crate) fn render(self, value: DateTime<FixedOffset>) -> String {
        let mut out = format!(
            "{}{}",
            iso::full_local_date_time(value.naive_local()),
            iso::offset_id(*value.offset())
        );
        self.push_id(&mut out);
        out
    }

    /// Compact rendering: `2025-04-17T12:00+09:00[Asia/Seoul]`.
    pub(crate) fn render_compact(self, value: DateTime<FixedOffset>) -> String {
        let mut out = format!(
            "{}{}",
            iso::local_date_time(value.naive_local()),
            iso::offset_id(*value.offset())
        );
        self.push_id(&mut out);
        out
    }

    /// Appends the bracketed id; plain offsets have none.
    fn push_id(self, out: &mut String) {
        match self {
            Self::Region(tz) => {
                out.push('[');
                out.push_str(tz.name());
                out.push(']');
            }
            Self::Prefixed { prefix, offset } => {
                out.push('[');
                out.push_str(prefix);
                if offset.local_minus_utc() != 0 {
                    out.push_str(&iso::offset_id(offset));
                }
                out.push(']');
            }
            Self::Fixed(_) => {}
        }
    }
}

impl FromStr for Zone {
    type Err = ActionError;

    fn from_str(id: &str) -> ActionResult<Self> {
        let unknown = || ActionError::UnknownZone {
            zone: id.to_owned(),
        };

        if id == "Z" {
            return Ok(Self::Fixed(Utc.fix()));
        }
        if id.starts_with(['+', '-']) {
            return parse_offset(id).map(Self::Fixed).ok_or_else(unknown);
        }
        if let Some((prefix, rest)) = OFFSET_PREFIXES
            .iter()
            .find_map(|prefix| id.strip_prefix(prefix).map(|rest| (*prefix, rest)))
            .filter(|(_, rest)| rest.starts_with(['+', '-']) || (rest.is_empty() && id == "UT"))
        {
            let offset = if rest.is_empty() {
                Utc.fix()
            } else {
                parse_offset(rest).ok_or_else(unknown)?
            };
            return Ok(Self::Prefixed { prefix, offset });
        }
        id.parse::<Tz>().map(Self::Region).map_err(|_| unknown())
    }
}

/// `+H`, `+HH`, `+HHMM`, or `+HH:MM`.
fn parse_offset(id: &str) -> Option<FixedOffset> {
    let (sign, digits) = id.split_at(1);
    let sign = if sign == "-" { -1 } else { 1 };
    let digits = digits.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > MAX_OFFSET_HOURS || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// All IANA identifiers known to the bundled database, sorted.
pub(crate) fn available_ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(text: &str) -> NaiveDateTime {
        iso::parse_date_time(text).unwrap()
    }

    #[test]
    fn parses_regions_and_offsets() {
        assert!(matches!("Asia/Seoul".parse::<Zone>(), Ok(Zone::Region(_))));
        assert!(matches!("UTC".parse::<Zone>(), Ok(Zone::Region(_))));
        assert!(matches!("Z".parse::<Zone>(), Ok(Zone::Fixed(_))));
        assert!(matches!("+09:00".parse::<Zone>(), Ok(Zone::Fixed(_))));
        assert!(matches!("-0530".parse::<Zone>(), Ok(Zone::Fixed(_))));
        assert!(matches!(
            "Invalid/Zone".parse::<Zone>(),
            Err(ActionError::UnknownZone { .. })
        ));
        assert!("+25:00".parse::<Zone>().is_err());
    }

    #[test]
    fn parses_prefixed_offsets() {
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            "UTC+09:00".parse::<Zone>().unwrap(),
            Zone::Prefixed { prefix: "UTC", offset: seoul }
        );
        assert_eq!(
            "GMT+9".parse::<Zone>().unwrap(),
            Zone::Prefixed { prefix: "GMT", offset: seoul }
        );
        assert!(matches!(
            "UT-05".parse::<Zone>(),
            Ok(Zone::Prefixed { prefix: "UT", .. })
        ));
        assert!(matches!("UT".parse::<Zone>(), Ok(Zone::Prefixed { prefix: "UT", .. })));
        assert!(matches!("GMT".parse::<Zone>(), Ok(Zone::Region(_))));
        assert!(matches!(
            "UTC+25".parse::<Zone>(),
            Err(ActionError::UnknownZone { .. })
        ));
        assert!("UTCX".parse::<Zone>().is_err());
    }

    #[test]
    fn renders_prefixed_ids() {
        let zone: Zone = "GMT+9".parse().unwrap();
        let value = zone.resolve(local("2025-04-17T12:00:00")).unwrap();
        assert_eq!(zone.render(value), "2025-04-17T12:00:00+09:00[GMT+09:00]");
        assert!(!zone.is_dst(Utc::now()));

        let zone: Zone = "UTC+00:00".parse().unwrap();
        let value = zone.resolve(local("2025-04-17T12:00:00")).unwrap();
        assert_eq!(zone.render(value), "2025-04-17T12:00:00Z[UTC]");
    }

    #[test]
    fn renders_region_suffix() {
        let zone: Zone = "Asia/Seoul".parse().unwrap();
        let value = zone.resolve(local("2025-04-17T12:00:00")).unwrap();
        assert_eq!(zone.render(value), "2025-04-17T12:00:00+09:00[Asia/Seoul]");
        assert_eq!(zone.render_compact(value), "2025-04-17T12:00+09:00[Asia/Seoul]");

        let fixed: Zone = "+09:00".parse().unwrap();
        assert_eq!(fixed.render(value), "2025-04-17T12:00:00+09:00");
    }

    #[test]
    fn gap_moves_forward() {
        let zone: Zone = "America/New_York".parse().unwrap();
        let value = zone.resolve(local("2025-03-09T02:30:00")).unwrap();
        assert_eq!(zone.render(value), "2025-03-09T03:30:00-04:00[America/New_York]");
    }

    #[test]
    fn overlap_prefers_earlier_offset() {
        let zone: Zone = "America/New_York".parse().unwrap();
        let value = zone.resolve(local("2025-11-02T01:30:00")).unwrap();
        assert_eq!(iso::offset_id(*value.offset()), "-04:00");
    }

    #[test]
    fn lists_known_ids() {
        let ids = available_ids();
        assert!(ids.contains(&"UTC"));
        assert!(ids.contains(&"Asia/Seoul"));
        assert!(ids.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
