//! Summary panel timestamps.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Time zone the summary timestamp is shown in by default.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Format an instant as local time in `tz`, e.g. `3/15/2024, 2:04:05 PM`.
pub fn format_timestamp(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
