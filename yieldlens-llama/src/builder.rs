use std::sync::Arc;

use yieldlens_core::connector::YieldConnector;
use yieldlens_middleware::ConnectorBuilder as GenericConnectorBuilder;
use yieldlens_types::CacheConfig;

use crate::LlamaConnector;

/// Builder type alias specialized for DeFiLlama connectors.
pub type LlamaConnectorBuilder = GenericConnectorBuilder;

impl LlamaConnector {
    /// Returns a builder around the default connector with response caching
    /// enabled (`CacheConfig::default()`).
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> LlamaConnectorBuilder {
        let raw: Arc<dyn YieldConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw).with_cache(&CacheConfig::default())
    }

    /// Expert-only: construct an unwrapped connector for manual composition.
    #[must_use]
    pub fn new_raw() -> Self {
        Self::new_default()
    }
}
