//! Timestamps for the "last updated" indicator.

use chrono::{DateTime, Local, Utc};

/// UTC instant at which a status poll last succeeded.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Wall-clock time of day in the local timezone, e.g. `14:03:27`.
#[must_use]
pub fn clock_label(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}
