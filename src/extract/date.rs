//! Epoch-seconds to calendar date rendering.

use std::fmt::Display;

use chrono::{Local, TimeZone};

/// Calendar date format used in candidate records and file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render epoch seconds as a `YYYY-MM-DD` date in the system's local timezone.
pub fn format_epoch_date(seconds: i64) -> Option<String> {
    format_epoch_date_in(seconds, &Local)
}

/// Render epoch seconds as a `YYYY-MM-DD` date in `tz`.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn format_epoch_date_in<Tz>(seconds: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(seconds, 0)
        .single()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
}
