use async_trait::async_trait;

use crate::{Capability, ChartPoint, RawPool, YieldError};
pub use yieldlens_types::ConnectorKey;

/// Focused role trait for connectors that list every pool the provider tracks.
#[async_trait]
pub trait PoolsProvider: Send + Sync {
    /// Fetch the full, unfiltered pool list.
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError>;
}

/// Focused role trait for connectors that serve historical chart samples.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Fetch every historical sample the provider holds for `pool_id`.
    ///
    /// Samples are returned as delivered: unsorted input and mixed timestamp
    /// encodings are allowed and resolved by `timeseries::monthly`.
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError>;
}

/// Base connector trait: identity plus capability discovery.
///
/// Connectors advertise what they can serve by returning trait objects from the
/// `as_*_provider` accessors. The orchestrator skips connectors whose accessor
/// returns `None` for the requested capability.
#[async_trait]
pub trait YieldConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "yieldlens-llama").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise the pool list capability.
    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        None
    }

    /// Advertise the chart capability.
    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        None
    }

    /// Whether this connector serves `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Pools => self.as_pools_provider().is_some(),
            Capability::Chart => self.as_chart_provider().is_some(),
            _ => false,
        }
    }
}
