use chrono::{DateTime, Duration, SecondsFormat, Utc};
use yieldlens_core::{ChartMetrics, ChartPoint, ChartTimestamp};

use super::pools;

/// Weekly samples per chart; a little over a year.
const WEEKS: i64 = 60;

/// Deterministic weekly chart for `pool_id`, ending at the most recent
/// midnight before `now`.
///
/// Even samples carry ISO-8601 strings, odd samples epoch seconds, matching the
/// mixed encodings the resampler accepts.
pub fn by_pool(pool_id: &str, now: DateTime<Utc>) -> Option<Vec<ChartPoint>> {
    let base = pools::base_apy(pool_id)?;
    let midnight = now.date_naive().and_hms_opt(0, 0, 0)?.and_utc();
    let start = midnight - Duration::weeks(WEEKS - 1);

    let points = (0..WEEKS)
        .map(|i| {
            let at = start + Duration::weeks(i);
            let timestamp = if i % 2 == 0 {
                ChartTimestamp::Text(at.to_rfc3339_opts(SecondsFormat::Millis, true))
            } else {
                ChartTimestamp::Seconds(at.timestamp())
            };
            // Bounded wobble around the pool's mean APY.
            let step = f64::from(u8::try_from(i.rem_euclid(13)).unwrap_or(0));
            let apy = base + (step - 6.0) * 0.05;
            ChartPoint {
                timestamp: Some(timestamp),
                metrics: ChartMetrics {
                    apy: Some(apy),
                    tvl_usd: Some(1_000_000.0 + 10_000.0 * step),
                    apy_base: Some(apy * 0.8),
                    apy_reward: Some(apy * 0.2),
                    ..ChartMetrics::default()
                },
            }
        })
        .collect();
    Some(points)
}
