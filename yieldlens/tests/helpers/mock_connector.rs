#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::time::{Duration, sleep};
use yieldlens_core::connector::{ChartProvider, PoolsProvider};
use yieldlens_core::{ChartPoint, RawPool, YieldConnector, YieldError};

/// Simple in-memory connector used by integration tests.
/// Capabilities are advertised only when a response or closure is configured.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub pools: Option<Vec<RawPool>>,
    pub pools_fn: Option<Arc<dyn Fn() -> Result<Vec<RawPool>, YieldError> + Send + Sync>>,
    pub chart_fn: Option<Arc<dyn Fn(&str) -> Result<Vec<ChartPoint>, YieldError> + Send + Sync>>,
    pub calls: AtomicUsize,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl YieldConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        if self.pools.is_some() || self.pools_fn.is_some() {
            Some(self as &dyn PoolsProvider)
        } else {
            None
        }
    }

    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        if self.chart_fn.is_some() {
            Some(self as &dyn ChartProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl PoolsProvider for MockConnector {
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError> {
        self.pause().await;
        if let Some(f) = &self.pools_fn {
            return (f)();
        }
        self.pools
            .clone()
            .ok_or_else(|| YieldError::unsupported("pools"))
    }
}

#[async_trait]
impl ChartProvider for MockConnector {
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        self.pause().await;
        match &self.chart_fn {
            Some(f) => (f)(pool_id),
            None => Err(YieldError::unsupported("chart")),
        }
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    delay_ms: u64,
    pools: Option<Vec<RawPool>>,
    pools_fn: Option<Arc<dyn Fn() -> Result<Vec<RawPool>, YieldError> + Send + Sync>>,
    chart_fn: Option<Arc<dyn Fn(&str) -> Result<Vec<ChartPoint>, YieldError> + Send + Sync>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            delay_ms: 0,
            pools: None,
            pools_fn: None,
            chart_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn returns_pools_ok(mut self, pools: Vec<RawPool>) -> Self {
        self.pools = Some(pools);
        self
    }

    pub fn with_pools_fn<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<Vec<RawPool>, YieldError> + Send + Sync + 'static,
    {
        self.pools_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_chart_ok(self, points: Vec<ChartPoint>) -> Self {
        self.with_chart_fn(move |_| Ok(points.clone()))
    }

    pub fn with_chart_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<ChartPoint>, YieldError> + Send + Sync + 'static,
    {
        self.chart_fn = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            delay_ms: self.delay_ms,
            pools: self.pools,
            pools_fn: self.pools_fn,
            chart_fn: self.chart_fn,
            calls: AtomicUsize::new(0),
        })
    }
}
