//! yieldlens-llama
//!
//! Public connector that implements `YieldConnector` on top of the DeFiLlama
//! yields API (`/pools` and `/chart/{pool}`).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

pub use builder::LlamaConnectorBuilder;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{LlamaChart, LlamaPools, RealAdapter};
use async_trait::async_trait;
use yieldlens_core::connector::{ChartProvider, ConnectorKey, PoolsProvider, YieldConnector};
use yieldlens_core::{ChartPoint, RawPool, YieldError};

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type PoolsAdapter = Arc<dyn LlamaPools>;
#[cfg(not(feature = "test-adapters"))]
type PoolsAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type ChartAdapter = Arc<dyn LlamaChart>;
#[cfg(not(feature = "test-adapters"))]
type ChartAdapter = AdapterArc;

/// Public connector type. Production users construct it with `LlamaConnector::new()`.
pub struct LlamaConnector {
    pools: PoolsAdapter,
    chart: ChartAdapter,
}

impl LlamaConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("yieldlens-llama");

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("unknown pool")
    }

    fn normalize_error(e: YieldError, what: &str) -> YieldError {
        match e {
            YieldError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    YieldError::not_found(what.to_string())
                } else {
                    YieldError::connector(Self::KEY.as_str(), msg)
                }
            }
            YieldError::Other(msg) => YieldError::connector(Self::KEY.as_str(), msg),
            other => other,
        }
    }

    /// Build against the public API with a fresh HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::from_adapter(&RealAdapter::new_default())
    }

    /// Build against the public API using an existing `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(http: reqwest::Client) -> Self {
        Self::from_adapter(&RealAdapter::new(http))
    }

    /// Build against a custom API root.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base_url` cannot be used as an API root.
    pub fn new_with_base_url(base_url: &str) -> Result<Self, YieldError> {
        Self::try_new_with_reqwest_client(reqwest::Client::new(), base_url)
    }

    /// Build from a provided `reqwest::Client` and API root.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base_url` cannot be used as an API root.
    pub fn try_new_with_reqwest_client(
        http: reqwest::Client,
        base_url: &str,
    ) -> Result<Self, YieldError> {
        let a = RealAdapter::with_base_url(http, base_url)?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            pools: adapter.clone_arc_pools(),
            chart: adapter.clone_arc_chart(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            pools: Arc::clone(&shared),
            chart: shared,
        }
    }
}

impl YieldConnector for LlamaConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "DefiLlama"
    }

    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        Some(self as &dyn PoolsProvider)
    }

    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        Some(self as &dyn ChartProvider)
    }
}

#[async_trait]
impl PoolsProvider for LlamaConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "yieldlens_llama::pools", skip(self), err)
    )]
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError> {
        let pools = self
            .pools
            .fetch_pools()
            .await
            .map_err(|e| Self::normalize_error(e, "pools"))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = pools.len(), "fetched pools");
        Ok(pools)
    }
}

#[async_trait]
impl ChartProvider for LlamaConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "yieldlens_llama::chart", skip(self), err)
    )]
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        let id = pool_id.trim();
        if id.is_empty() {
            return Err(YieldError::InvalidArg("pool id must not be empty".into()));
        }
        let points = self
            .chart
            .fetch_chart(id)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("chart for pool {id}")))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = points.len(), "fetched chart samples");
        Ok(points)
    }
}
