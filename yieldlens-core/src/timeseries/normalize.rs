//! Resolve chart sample timestamps to epoch milliseconds.
//!
//! Convention (kept from the analytics API, see `ChartTimestamp`):
//! - strings are ISO-8601 dates and resolve to their instant in milliseconds;
//! - numbers are **epoch seconds** and are multiplied by 1000.
//!
//! Strings without an offset (`2024-01-01T00:00:00`, `2024-01-01`) are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::ChartTimestamp;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalize a sample timestamp to epoch milliseconds.
///
/// Returns `None` for unparseable strings, non-finite numbers, and instants
/// outside the range `chrono` can represent.
///
/// ```
/// use yieldlens_core::{ChartTimestamp, normalize_timestamp_ms};
/// let iso = ChartTimestamp::Text("2024-01-01T00:00:00.000Z".into());
/// let secs = ChartTimestamp::Seconds(1_704_067_200);
/// assert_eq!(normalize_timestamp_ms(&iso), normalize_timestamp_ms(&secs));
/// assert_eq!(normalize_timestamp_ms(&ChartTimestamp::Text("soon".into())), None);
/// ```
#[must_use]
pub fn normalize_timestamp_ms(ts: &ChartTimestamp) -> Option<i64> {
    let ms = match ts {
        ChartTimestamp::Seconds(secs) => secs.checked_mul(1000)?,
        ChartTimestamp::FractionalSeconds(secs) => {
            let ms = (secs * 1000.0).floor();
            if !ms.is_finite() || ms.abs() > i64::MAX as f64 / 2.0 {
                return None;
            }
            ms as i64
        }
        ChartTimestamp::Text(s) => parse_iso_ms(s.trim())?,
    };
    // Reject instants chrono cannot turn back into a calendar date.
    DateTime::from_timestamp_millis(ms).map(|_| ms)
}

fn parse_iso_ms(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Convert normalized milliseconds back to whole epoch seconds (floor).
#[must_use]
pub const fn millis_to_seconds(ms: i64) -> i64 {
    ms.div_euclid(1000)
}
