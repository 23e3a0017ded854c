//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Dashboard request
//!     ↓
//! Outermost middleware (added last)
//!     ↓
//! Cache (serves repeated pool-list and chart reads)
//!     ↓
//! Raw connector (e.g. DeFiLlama - makes the HTTP calls)
//! ```
//!
//! `layers` stores middleware outermost-first; `build()` applies them in
//! reverse so that `layers[0]` ends up wrapping everything else.

use std::sync::Arc;

use yieldlens_core::connector::YieldConnector;
use yieldlens_core::{Middleware, YieldError};
use yieldlens_types::CacheConfig;

use crate::cache::CacheMiddleware;

const CACHE_LAYER: &str = "CachingMiddleware";

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn YieldConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn YieldConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the cache layer.
    ///
    /// The cache sits directly around the raw connector so that any layer added
    /// later observes cached responses.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self.layers.push(Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names and configuration snapshots, outermost first, ending with
    /// the raw connector.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, serde_json::Value)> {
        let mut out: Vec<(&'static str, serde_json::Value)> = self
            .layers
            .iter()
            .map(|l| (l.name(), l.config_json()))
            .collect();
        out.push((
            "RawConnector",
            serde_json::json!({ "name": self.raw.name() }),
        ));
        out
    }

    fn validate(&self) -> Result<(), YieldError> {
        for layer in &self.layers {
            if layer.name() != CACHE_LAYER {
                continue;
            }
            let cfg = layer.config_json();
            let field = |k: &str| cfg.get(k).and_then(serde_json::Value::as_u64).unwrap_or(0);
            let any_ttl = field("pools_ttl_ms") > 0 || field("chart_ttl_ms") > 0;
            if any_ttl && field("max_entries") == 0 {
                return Err(YieldError::InvalidMiddlewareStack {
                    message: "cache max_entries must be positive when a TTL is set".into(),
                });
            }
        }
        Ok(())
    }

    /// Build the wrapped connector.
    ///
    /// Layers are applied innermost first, so `layers = [Outer, Cache]` yields
    /// `Outer(Cache(Raw))`.
    ///
    /// # Errors
    /// Returns `InvalidMiddlewareStack` when a layer's configuration is
    /// inconsistent (e.g. a cache with a TTL but no capacity).
    pub fn build(self) -> Result<Arc<dyn YieldConnector>, YieldError> {
        self.validate()?;
        let mut acc: Arc<dyn YieldConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(layer = m.name(), connector = acc.name(), "applying middleware");
            acc = m.apply(acc);
        }
        Ok(acc)
    }
}
