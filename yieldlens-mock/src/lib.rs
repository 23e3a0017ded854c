//! Mock connectors for CI-safe tests and demos.
//!
//! - [`MockConnector`]: static pool feed and deterministic weekly charts.
//! - [`DynamicMockConnector`]: behavior scripted at runtime through a controller.
use async_trait::async_trait;
use yieldlens_core::connector::{ChartProvider, PoolsProvider, YieldConnector};
use yieldlens_core::{ChartPoint, RawPool, YieldError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Pool id that makes [`MockConnector`] fail the chart request.
pub const FAIL_POOL: &str = "FAIL";
/// Pool id that makes [`MockConnector`] stall before answering.
pub const TIMEOUT_POOL: &str = "TIMEOUT";

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Stable connector name.
    pub const NAME: &'static str = "yieldlens-mock";

    /// Create the connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(pool_id: &str, capability: &'static str) -> Result<(), YieldError> {
        match pool_id {
            FAIL_POOL => Err(YieldError::connector(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            TIMEOUT_POOL => {
                // Long enough to trip a short provider timeout.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl YieldConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        Some(self as &dyn PoolsProvider)
    }

    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        Some(self as &dyn ChartProvider)
    }
}

#[async_trait]
impl PoolsProvider for MockConnector {
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError> {
        Ok(fixtures::pools::all())
    }
}

#[async_trait]
impl ChartProvider for MockConnector {
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        Self::maybe_fail_or_timeout(pool_id, "chart").await?;
        fixtures::charts::by_pool(pool_id, chrono::Utc::now())
            .ok_or_else(|| YieldError::not_found(format!("chart for pool {pool_id}")))
    }
}
