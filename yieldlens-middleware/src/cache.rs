use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use yieldlens_core::connector::{ChartProvider, PoolsProvider};
use yieldlens_core::{ChartPoint, RawPool, YieldConnector, YieldError};
use yieldlens_types::{CacheConfig, Capability};

#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

/// Bounded store whose entries expire `ttl` after insertion.
struct TtlStore<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> TtlStore<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity.max(1))
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for TtlStore<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }
    async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create a cache layer from `cfg`.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl yieldlens_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn YieldConnector>) -> Arc<dyn YieldConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "pools_ttl_ms": self.cfg.pools_ttl_ms,
            "chart_ttl_ms": self.cfg.chart_ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

// Per-capability stores; `None` means disabled (TTL=0).
struct Stores {
    pools: Option<Arc<dyn CacheStore<(), Arc<Vec<RawPool>>>>>,
    chart: Option<Arc<dyn CacheStore<String, Arc<Vec<ChartPoint>>>>>,
}

/// Connector wrapper that memoizes successful pool-list and chart responses.
///
/// Errors pass through and are never stored.
pub struct CachingConnector {
    inner: Arc<dyn YieldConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<K, V>(
        cfg: &CacheConfig,
        cap: Capability,
        capacity: u64,
    ) -> Option<Arc<dyn CacheStore<K, V>>>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        Some(Arc::new(TtlStore::<K, V>::new(capacity, ttl)))
    }

    /// Wrap `inner` with the stores `cfg` enables.
    #[must_use]
    pub fn new(inner: Arc<dyn YieldConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            pools: Self::maybe_store(cfg, Capability::Pools, 1),
            chart: Self::maybe_store(cfg, Capability::Chart, cfg.max_entries),
        };
        Self { inner, stores }
    }
}

impl YieldConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        self.inner
            .as_pools_provider()
            .map(|_| self as &dyn PoolsProvider)
    }

    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        self.inner
            .as_chart_provider()
            .map(|_| self as &dyn ChartProvider)
    }
}

#[async_trait]
impl PoolsProvider for CachingConnector {
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError> {
        let inner = self
            .inner
            .as_pools_provider()
            .ok_or_else(|| YieldError::unsupported("pools"))?;
        if let Some(store) = &self.stores.pools {
            if let Some(v) = store.get(&()).await {
                #[cfg(feature = "tracing")]
                tracing::trace!(connector = self.inner.name(), "pools cache hit");
                return Ok((*v).clone());
            }
            let value = inner.pools().await?;
            store.put((), Arc::new(value.clone())).await;
            return Ok(value);
        }
        inner.pools().await
    }
}

#[async_trait]
impl ChartProvider for CachingConnector {
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        let inner = self
            .inner
            .as_chart_provider()
            .ok_or_else(|| YieldError::unsupported("chart"))?;
        if let Some(store) = &self.stores.chart {
            let key = pool_id.to_string();
            if let Some(v) = store.get(&key).await {
                #[cfg(feature = "tracing")]
                tracing::trace!(connector = self.inner.name(), pool_id, "chart cache hit");
                return Ok((*v).clone());
            }
            let value = inner.chart(pool_id).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        inner.chart(pool_id).await
    }
}
