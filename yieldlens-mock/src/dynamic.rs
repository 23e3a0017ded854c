use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use yieldlens_core::connector::{ChartProvider, PoolsProvider, YieldConnector};
use yieldlens_core::{ChartPoint, RawPool, YieldError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(YieldError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self, capability: &'static str) -> Result<T, YieldError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delay(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                Err(YieldError::unsupported(capability))
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    pools_rule: Option<MockBehavior<Vec<RawPool>>>,
    chart_rules: HashMap<String, MockBehavior<Vec<ChartPoint>>>,
    pools_calls: usize,
    chart_calls: HashMap<String, usize>,
}

/// Handle for scripting a [`DynamicMockConnector`] and inspecting its calls.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Script the next and all following `pools()` calls.
    pub async fn set_pools_behavior(&self, behavior: MockBehavior<Vec<RawPool>>) {
        self.state.lock().await.pools_rule = Some(behavior);
    }

    /// Script `chart(pool_id)` calls.
    pub async fn set_chart_behavior(&self, pool_id: &str, behavior: MockBehavior<Vec<ChartPoint>>) {
        self.state
            .lock()
            .await
            .chart_rules
            .insert(pool_id.to_string(), behavior);
    }

    /// Number of `pools()` calls received so far.
    pub async fn pools_calls(&self) -> usize {
        self.state.lock().await.pools_calls
    }

    /// Number of `chart(pool_id)` calls received so far.
    pub async fn chart_calls(&self, pool_id: &str) -> usize {
        self.state
            .lock()
            .await
            .chart_calls
            .get(pool_id)
            .copied()
            .unwrap_or(0)
    }

    /// Drop every scripted behavior and reset call counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// Connector whose responses are scripted through a [`DynamicMockController`].
///
/// Unscripted calls fail with `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a connector named `name` and the controller that scripts it.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn YieldConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn YieldConnector>, controller)
    }
}

impl YieldConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_pools_provider(&self) -> Option<&dyn PoolsProvider> {
        Some(self as &dyn PoolsProvider)
    }

    fn as_chart_provider(&self) -> Option<&dyn ChartProvider> {
        Some(self as &dyn ChartProvider)
    }
}

#[async_trait]
impl PoolsProvider for DynamicMockConnector {
    async fn pools(&self) -> Result<Vec<RawPool>, YieldError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.pools_calls += 1;
            guard.pools_rule.clone()
        };
        match behavior {
            Some(b) => b.run("pools").await,
            None => Err(YieldError::unsupported("pools")),
        }
    }
}

#[async_trait]
impl ChartProvider for DynamicMockConnector {
    async fn chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.chart_calls.entry(pool_id.to_string()).or_default() += 1;
            guard.chart_rules.get(pool_id).cloned()
        };
        match behavior {
            Some(b) => b.run("chart").await,
            None => Err(YieldError::unsupported("chart")),
        }
    }
}
