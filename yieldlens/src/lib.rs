//! yieldlens routes DeFi yield data requests across pluggable connectors and
//! turns pool histories into chart-ready monthly APY series.
//!
//! Overview
//! - Routes requests to connectors that implement the `yieldlens_core` contracts.
//! - Selects one pool per target project and category, falling back to the
//!   first feed entries and finally to built-in sample pools.
//! - Resamples irregular chart histories into a fixed number of calendar months.
//! - Normalizes error handling across providers into `YieldError`.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: registration order, per-provider timeout, aggregated
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races every capable provider; lowest tail latency but higher fanout.
//! - `pools_with_fallback` never fails: a dashboard always has something to show,
//!   at the cost of presenting stale sample data while the feed is down.
//! - Month buckets follow the configured time zone (UTC by default), so a sample
//!   near midnight can land in a different month than in the viewer's locale.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use yieldlens::{Dashboard, FetchStrategy, PoolCategory, Session};
//!
//! let dashboard = Dashboard::builder()
//!     .with_connector(yieldlens_llama::LlamaConnector::new().build()?)
//!     .fetch_strategy(FetchStrategy::PriorityWithFallback)
//!     .months(12)
//!     .build()?;
//!
//! let pools = dashboard.pools_with_fallback().await;
//! let session = Session::new();
//! let stats = Dashboard::category_stats(&pools, Some(PoolCategory::YieldAggregator), &session);
//! let series = dashboard.monthly_apy(&pools[0].id).await?;
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Dashboard, DashboardBuilder, tag_err};
pub use router::util::{collapse_errors, join_with_deadline};

pub use yieldlens_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use yieldlens_core::{
    CacheConfig, Capability, CategoryStats, ChartMetrics, ChartPoint, ChartTimestamp,
    DashboardConfig, FetchStrategy, MonthKey, MonthlyPoint, Pool, PoolCategory, RawPool, Session,
    TargetCatalog, UserAuth, WalletAccounts, WalletConnection, WalletProvider, YieldConnector,
    YieldError,
};
pub use yieldlens_core::MAX_MONTH_COUNT;
pub use yieldlens_core::format::{format_apy, format_tvl, project_initials};
