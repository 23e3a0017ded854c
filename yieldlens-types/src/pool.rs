//! Pool records: the raw analytics API shape and the dashboard's normalized view.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::YieldError;

/// Dashboard category a pool is presented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolCategory {
    /// Money markets (supply/borrow).
    #[serde(rename = "Lending")]
    Lending,
    /// Liquid staking derivatives.
    #[serde(rename = "Liquid Staking")]
    LiquidStaking,
    /// Vault strategies that route deposits across protocols.
    ///
    /// This category is wallet-gated in the dashboard.
    #[serde(rename = "Yield Aggregator")]
    YieldAggregator,
}

impl PoolCategory {
    /// All categories in presentation order.
    pub const ALL: [Self; 3] = [Self::Lending, Self::LiquidStaking, Self::YieldAggregator];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lending => "Lending",
            Self::LiquidStaking => "Liquid Staking",
            Self::YieldAggregator => "Yield Aggregator",
        }
    }

    /// Whether viewing pools of this category requires a connected wallet or login.
    #[must_use]
    pub const fn is_gated(self) -> bool {
        matches!(self, Self::YieldAggregator)
    }
}

impl fmt::Display for PoolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolCategory {
    type Err = YieldError;

    /// Case-insensitive; accepts the display label or its kebab/snake forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match norm.as_str() {
            "lending" => Ok(Self::Lending),
            "liquid staking" => Ok(Self::LiquidStaking),
            "yield aggregator" => Ok(Self::YieldAggregator),
            _ => Err(YieldError::InvalidArg(format!("unknown pool category: {s}"))),
        }
    }
}

/// Model predictions attached to a pool by the analytics API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    /// Probability attached to the predicted class.
    #[serde(default)]
    pub predicted_probability: Option<f64>,
    /// Predicted class label (e.g. "Stable/Up").
    #[serde(default)]
    pub predicted_class: Option<String>,
    /// Confidence bucket.
    #[serde(default)]
    pub binned_confidence: Option<f64>,
}

/// Pool entry exactly as returned by the analytics API `/pools` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPool {
    /// Opaque pool identifier.
    pub pool: String,
    /// Protocol slug, e.g. `aave-v3`.
    pub project: String,
    /// Chain name, e.g. `Ethereum`.
    pub chain: String,
    /// Pool token symbol.
    pub symbol: String,
    /// Total value locked in USD.
    #[serde(default)]
    pub tvl_usd: f64,
    /// Current APY in percent.
    #[serde(default)]
    pub apy: Option<f64>,
    /// 30-day mean APY in percent.
    #[serde(default)]
    pub apy_mean30d: Option<f64>,
    /// Optional prediction block.
    #[serde(default)]
    pub predictions: Option<Predictions>,
    /// APY volatility.
    #[serde(default)]
    pub sigma: Option<f64>,
    /// Free-form pool description.
    #[serde(default)]
    pub pool_meta: Option<String>,
    /// Underlying token addresses or symbols.
    #[serde(default)]
    pub underlying_tokens: Option<Vec<String>>,
    /// Reward token addresses or symbols.
    #[serde(default)]
    pub reward_tokens: Option<Vec<String>>,
}

/// Normalized pool shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Opaque pool identifier (the API's `pool` field).
    pub id: String,
    /// Protocol slug.
    pub project: String,
    /// Chain name.
    pub chain: String,
    /// Category this pool was selected for.
    pub category: PoolCategory,
    /// Pool token symbol.
    pub symbol: String,
    /// Total value locked in USD.
    pub tvl_usd: f64,
    /// Current APY in percent (0 when unreported).
    pub apy: f64,
    /// 30-day mean APY in percent (0 when unreported).
    pub apy_mean_30d: f64,
    /// Predicted probability (0 when unreported).
    pub prediction: f64,
    /// APY volatility (0 when unreported).
    pub sigma: f64,
    /// Free-form pool description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_meta: Option<String>,
    /// Underlying tokens.
    #[serde(default)]
    pub underlying_tokens: Vec<String>,
    /// Reward tokens.
    #[serde(default)]
    pub reward_tokens: Vec<String>,
    /// Project website, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Pool {
    /// Normalize a raw API pool into a dashboard pool tagged with `category`.
    ///
    /// Missing numeric fields become `0.0`, missing token lists become empty,
    /// and an empty `poolMeta` is treated as absent.
    #[must_use]
    pub fn from_raw(raw: &RawPool, category: PoolCategory) -> Self {
        Self {
            id: raw.pool.clone(),
            project: raw.project.clone(),
            chain: raw.chain.clone(),
            category,
            symbol: raw.symbol.clone(),
            tvl_usd: raw.tvl_usd,
            apy: raw.apy.unwrap_or(0.0),
            apy_mean_30d: raw.apy_mean30d.unwrap_or(0.0),
            prediction: raw
                .predictions
                .as_ref()
                .and_then(|p| p.predicted_probability)
                .unwrap_or(0.0),
            sigma: raw.sigma.unwrap_or(0.0),
            pool_meta: raw.pool_meta.clone().filter(|m| !m.is_empty()),
            underlying_tokens: raw.underlying_tokens.clone().unwrap_or_default(),
            reward_tokens: raw.reward_tokens.clone().unwrap_or_default(),
            url: None,
        }
    }
}

/// Per-category pool counts, split by access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Pools in the category.
    pub total: usize,
    /// Pools hidden behind the access gate.
    pub locked: usize,
    /// Pools visible to the current session.
    pub unlocked: usize,
}
