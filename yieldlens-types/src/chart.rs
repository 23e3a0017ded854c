//! Historical chart samples and the monthly points derived from them.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp of a chart sample as delivered by the analytics API.
///
/// The two encodings are interpreted differently and must not be mixed up:
/// - `Text` is an ISO-8601 date or date-time string; it resolves to milliseconds.
/// - `Seconds` / `FractionalSeconds` are **epoch seconds** and are scaled by 1000.
///
/// Resolution happens once, in `yieldlens_core::timeseries::normalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartTimestamp {
    /// Whole epoch seconds.
    Seconds(i64),
    /// Epoch seconds with a fractional part.
    FractionalSeconds(f64),
    /// ISO-8601 string such as `2024-01-01T00:00:00.000Z`.
    Text(String),
}

impl From<i64> for ChartTimestamp {
    fn from(secs: i64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<&str> for ChartTimestamp {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Numeric metrics carried by a chart sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetrics {
    /// Total APY in percent.
    #[serde(default)]
    pub apy: Option<f64>,
    /// Total value locked in USD.
    #[serde(default)]
    pub tvl_usd: Option<f64>,
    /// Base (organic) APY.
    #[serde(default)]
    pub apy_base: Option<f64>,
    /// Reward-token APY.
    #[serde(default)]
    pub apy_reward: Option<f64>,
    /// 7-day impermanent loss.
    #[serde(default)]
    pub il7d: Option<f64>,
    /// 7-day base APY.
    #[serde(default)]
    pub apy_base7d: Option<f64>,
}

/// One historical sample of a pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Sample time; `None` when missing, null, or of an unrecognized JSON type.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<ChartTimestamp>,
    /// Metrics reported at `timestamp`.
    #[serde(flatten)]
    pub metrics: ChartMetrics,
}

impl ChartPoint {
    /// Build a sample with only an APY value.
    pub fn with_apy(timestamp: impl Into<ChartTimestamp>, apy: f64) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            metrics: ChartMetrics {
                apy: Some(apy),
                ..ChartMetrics::default()
            },
        }
    }
}

fn lenient_timestamp<'de, D>(d: D) -> Result<Option<ChartTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Known(ChartTimestamp),
        Unknown(serde::de::IgnoredAny),
    }
    Ok(match Option::<Lenient>::deserialize(d)? {
        Some(Lenient::Known(ts)) => Some(ts),
        Some(Lenient::Unknown(_)) | None => None,
    })
}

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month bucket key.
///
/// Ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u32,
}

impl MonthKey {
    /// Construct a key; returns `None` unless `1 <= month <= 12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month `n` months before this one.
    #[must_use]
    pub const fn months_back(self, n: u32) -> Self {
        let idx = self.year as i64 * 12 + (self.month as i64 - 1) - n as i64;
        Self {
            year: idx.div_euclid(12) as i32,
            month: (idx.rem_euclid(12) + 1) as u32,
        }
    }

    /// Short chart label, e.g. `"Jan 24"` (English month, two-digit year).
    #[must_use]
    pub fn label(self) -> String {
        let name = SHORT_MONTHS[(self.month.clamp(1, 12) - 1) as usize];
        format!("{name} {:02}", self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A chart sample selected to represent one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Month this point represents.
    pub period: MonthKey,
    /// Chart label for `period`, e.g. `"Mar 25"`.
    pub month: String,
    /// Normalized timestamp of the selected sample, in epoch seconds.
    pub timestamp: i64,
    /// Metrics of the selected sample.
    #[serde(flatten)]
    pub metrics: ChartMetrics,
}
