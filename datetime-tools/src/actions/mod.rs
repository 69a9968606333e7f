//! Built-in action catalogue.
//!
//! Each submodule groups related actions; all of them live under
//! [`crate::ACTIONS_NAMESPACE`] and are picked up by
//! [`ActionRegistry::discover`](crate::registry::ActionRegistry::discover).
//! Dates are exchanged as ISO-8601 text (`2025-04-17`), date-times as ISO
//! local date-times (`2025-04-17T10:30:00`). Functions that consult the clock
//! read it in UTC.

pub mod calc;
pub mod compare;
pub mod day;
pub mod format;
pub mod month;
pub mod now;
pub mod week;
pub mod zone;

use chrono::{NaiveDate, Utc};

/// Today's date in UTC.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
