//! Epoch disambiguation for sample timestamps.
//!
//! Producers have historically posted either seconds or milliseconds. The
//! reader tries seconds first and falls back to milliseconds when the value
//! would land outside the representable calendar, matching the fallback every
//! deployed consumer applies.

use chrono::{DateTime, TimeZone, Utc};

/// Epoch seconds of 0001-01-01T00:00:00Z, the earliest calendar instant.
const MIN_EPOCH_SECONDS: i64 = -62_135_596_800;

/// Epoch seconds of 9999-12-31T23:59:59Z, the latest calendar instant.
const MAX_EPOCH_SECONDS: i64 = 253_402_300_799;

/// Interpret a raw epoch field as a UTC instant.
///
/// Values inside the calendar range are read as seconds; anything outside is
/// re-read as milliseconds. Returns `None` when the field is not an integer
/// or is implausible under both readings.
#[must_use]
pub fn epoch_to_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let value: i64 = raw.parse().ok()?;
    let seconds = if (MIN_EPOCH_SECONDS..=MAX_EPOCH_SECONDS).contains(&value) {
        value
    } else {
        value / 1000
    };
    Utc.timestamp_opt(seconds, 0).single()
}
