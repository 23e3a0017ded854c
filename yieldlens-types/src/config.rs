//! Configuration types shared across the dashboard and connectors.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Capability, PoolCategory};

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Time-to-live settings for the connector cache layer.
///
/// A TTL of `0` disables caching for that capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the full pool list, in milliseconds.
    pub pools_ttl_ms: u64,
    /// TTL for per-pool chart series, in milliseconds.
    pub chart_ttl_ms: u64,
    /// Upper bound on cached chart series.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pools_ttl_ms: 5 * 60 * 1000,
            chart_ttl_ms: 10 * 60 * 1000,
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    /// TTL for `cap`; `None` when caching is disabled for it.
    #[must_use]
    pub const fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        let ms = match cap {
            Capability::Pools => self.pools_ttl_ms,
            Capability::Chart => self.chart_ttl_ms,
        };
        if ms == 0 {
            None
        } else {
            Some(Duration::from_millis(ms))
        }
    }
}

/// Protocol slugs the dashboard looks for, grouped by category.
///
/// Iteration follows category order (`Lending`, `Liquid Staking`,
/// `Yield Aggregator`), then project order within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCatalog {
    groups: BTreeMap<PoolCategory, Vec<String>>,
}

impl TargetCatalog {
    /// An empty catalog.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Replace the project list for `category`.
    #[must_use]
    pub fn with_projects(mut self, category: PoolCategory, projects: &[&str]) -> Self {
        self.groups.insert(
            category,
            projects.iter().map(|p| (*p).to_string()).collect(),
        );
        self
    }

    /// Projects configured for `category` (empty when none).
    #[must_use]
    pub fn projects(&self, category: PoolCategory) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(category, project)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolCategory, &str)> + '_ {
        self.groups
            .iter()
            .flat_map(|(cat, projects)| projects.iter().map(move |p| (*cat, p.as_str())))
    }

    /// True when no category lists any project.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

impl Default for TargetCatalog {
    fn default() -> Self {
        Self::empty()
            .with_projects(PoolCategory::Lending, &["aave-v3", "compound-v3", "maple"])
            .with_projects(
                PoolCategory::LiquidStaking,
                &["lido", "binance-staked-eth", "stader"],
            )
            .with_projects(
                PoolCategory::YieldAggregator,
                &["cian-yield-layer", "yearn-finance", "beefy"],
            )
    }
}

/// Global configuration for the `Dashboard` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for a dashboard operation.
    pub request_timeout: Option<Duration>,
    /// Length of the monthly APY series.
    pub months: usize,
    /// Time zone used for calendar-month boundaries; UTC when `None`.
    pub chart_timezone: Option<chrono_tz::Tz>,
    /// Projects selected per category.
    pub catalog: TargetCatalog,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            months: 12,
            chart_timezone: None,
            catalog: TargetCatalog::default(),
        }
    }
}
