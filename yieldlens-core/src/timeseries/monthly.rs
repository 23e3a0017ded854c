use std::collections::HashMap;

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::timeseries::normalize::{millis_to_seconds, normalize_timestamp_ms};
use crate::{ChartPoint, MonthKey, MonthlyPoint};

/// Longest series the resampler produces (100 years); larger counts are clamped.
pub const MAX_MONTH_COUNT: usize = 1200;

/// A usable sample: resolved instant, its calendar month, and the original record.
struct Normalized<'a> {
    ms: i64,
    key: MonthKey,
    point: &'a ChartPoint,
}

fn month_key_of<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<MonthKey> {
    let local = DateTime::from_timestamp_millis(ms)?.with_timezone(tz);
    MonthKey::new(local.year(), local.month())
}

/// Midnight on the 1st of `key` in `tz`, as epoch milliseconds.
fn month_start_ms<Tz: TimeZone>(key: MonthKey, tz: &Tz) -> Option<i64> {
    let naive = NaiveDate::from_ymd_opt(key.year, key.month, 1)?.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        // Midnight skipped by a DST jump; fall back to UTC midnight.
        LocalResult::None => Some(naive.and_utc().timestamp_millis()),
    }
}

/// Index of the sample closest to `target` in a chronologically sorted slice.
///
/// Ties go to the earlier sample in slice order, which makes the result
/// identical to a linear scan keeping the first strict minimum.
fn nearest_index(sorted: &[Normalized<'_>], target: i64) -> Option<usize> {
    let right = sorted.partition_point(|n| n.ms < target);
    let left = right.checked_sub(1);
    let pick_left = match (left, sorted.get(right)) {
        (None, None) => return None,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (Some(l), Some(r)) => sorted[l].ms.abs_diff(target) <= r.ms.abs_diff(target),
    };
    if pick_left {
        let l = left?;
        // Rewind to the first sample sharing this instant.
        let run_ms = sorted[l].ms;
        Some(sorted.partition_point(|n| n.ms < run_ms))
    } else {
        Some(right)
    }
}

/// Resample irregular chart samples into one point per calendar month, ending
/// at the current UTC month.
///
/// See [`resample_monthly_at`] for the selection rules.
#[must_use]
pub fn resample_monthly(samples: &[ChartPoint], month_count: usize) -> Vec<MonthlyPoint> {
    resample_monthly_at(samples, month_count, Utc::now())
}

/// Like [`resample_monthly`], with month boundaries taken in `tz` (UTC when `None`).
#[must_use]
pub fn resample_monthly_in(
    samples: &[ChartPoint],
    month_count: usize,
    tz: Option<chrono_tz::Tz>,
) -> Vec<MonthlyPoint> {
    match tz {
        Some(tz) => resample_monthly_at(samples, month_count, Utc::now().with_timezone(&tz)),
        None => resample_monthly(samples, month_count),
    }
}

/// Resample irregular chart samples into a fixed-length monthly series ending at
/// the calendar month containing `now`.
///
/// - Every timestamp is normalized once to epoch milliseconds (strings are
///   ISO-8601, numbers are epoch seconds). Samples whose timestamp is missing
///   or unparseable are skipped.
/// - Samples are sorted chronologically (stable), then grouped by calendar
///   month in the time zone of `now`.
/// - For each of the last `month_count` months: the earliest sample of that
///   month is selected; a month without samples takes the sample nearest to
///   midnight on its 1st (ties go to the earlier sample). One sample can fill
///   several months.
/// - Output is oldest-first, labelled with the target month (`"Jan 24"`), and
///   carries the selected sample's timestamp in epoch seconds.
///
/// Returns an empty vector when no usable sample remains or `month_count` is 0.
/// Counts above [`MAX_MONTH_COUNT`] are clamped to it.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use yieldlens_core::{ChartPoint, resample_monthly_at};
///
/// let samples = vec![
///     ChartPoint::with_apy("2024-06-01T00:00:00Z", 6.0),
///     ChartPoint::with_apy("2024-01-01T00:00:00Z", 1.0),
///     ChartPoint::with_apy("2024-03-15T00:00:00Z", 3.0),
/// ];
/// let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
/// let series = resample_monthly_at(&samples, 6, now);
/// let labels: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
/// assert_eq!(labels, ["Jan 24", "Feb 24", "Mar 24", "Apr 24", "May 24", "Jun 24"]);
/// let apys: Vec<f64> = series.iter().filter_map(|p| p.metrics.apy).collect();
/// assert_eq!(apys, [1.0, 1.0, 3.0, 3.0, 6.0, 6.0]);
/// ```
#[must_use]
pub fn resample_monthly_at<Tz: TimeZone>(
    samples: &[ChartPoint],
    month_count: usize,
    now: DateTime<Tz>,
) -> Vec<MonthlyPoint> {
    if month_count == 0 {
        return Vec::new();
    }
    let month_count = month_count.min(MAX_MONTH_COUNT);
    let tz = now.timezone();

    let mut usable: Vec<Normalized<'_>> = samples
        .iter()
        .filter_map(|point| {
            let ms = point.timestamp.as_ref().and_then(normalize_timestamp_ms)?;
            let key = month_key_of(ms, &tz)?;
            Some(Normalized { ms, key, point })
        })
        .collect();
    if usable.is_empty() {
        return Vec::new();
    }
    usable.sort_by_key(|n| n.ms);

    // Sorted input: the first index seen per month is that month's earliest sample.
    let mut first_in_month: HashMap<MonthKey, usize> = HashMap::new();
    for (i, n) in usable.iter().enumerate() {
        first_in_month.entry(n.key).or_insert(i);
    }

    let Some(current) = MonthKey::new(now.year(), now.month()) else {
        return Vec::new();
    };

    let mut out: Vec<MonthlyPoint> = Vec::with_capacity(month_count);
    for back in 0..month_count {
        let Ok(back) = u32::try_from(back) else {
            break;
        };
        let target = current.months_back(back);
        let selected = match first_in_month.get(&target) {
            Some(&i) => Some(i),
            None => month_start_ms(target, &tz).and_then(|ms| nearest_index(&usable, ms)),
        };
        let Some(i) = selected else {
            continue;
        };
        let n = &usable[i];
        out.push(MonthlyPoint {
            period: target,
            month: target.label(),
            timestamp: millis_to_seconds(n.ms),
            metrics: n.point.metrics.clone(),
        });
    }
    out.reverse();
    out
}
