//! Wall-clock helpers that work in the browser and on the server.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::OffsetDateTime;

/// Seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Current Gregorian year (UTC).
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}
