use std::sync::Arc;
use std::time::Duration;

use yieldlens_core::{
    Capability, DashboardConfig, FetchStrategy, MAX_MONTH_COUNT, TargetCatalog, YieldConnector,
    YieldError,
};

use crate::router::util::collapse_errors;

/// Orchestrator that routes dashboard requests across registered connectors.
pub struct Dashboard {
    pub(crate) connectors: Vec<Arc<dyn YieldConnector>>,
    pub(crate) cfg: DashboardConfig,
}

/// Builder for constructing a `Dashboard` with custom configuration.
pub struct DashboardBuilder {
    connectors: Vec<Arc<dyn YieldConnector>>,
    cfg: DashboardConfig,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Create a new builder with defaults: no connectors, priority-with-fallback
    /// fetches, 5s provider timeout, 12 months of UTC-bucketed APY history and the
    /// default target catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: DashboardConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is the priority order used by
    /// `FetchStrategy::PriorityWithFallback`. Duplicates are not removed.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn YieldConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DashboardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select how providers are queried.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    ///
    /// Applied in both strategies; in `Latency` mode it caps stragglers.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for a single dashboard operation.
    ///
    /// When exceeded, the operation returns `RequestTimeout` for its capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Length of the series returned by `monthly_apy`.
    #[must_use]
    pub const fn months(mut self, months: usize) -> Self {
        self.cfg.months = months;
        self
    }

    /// Time zone whose calendar months bucket the APY series.
    #[must_use]
    pub const fn chart_timezone(mut self, tz: chrono_tz::Tz) -> Self {
        self.cfg.chart_timezone = Some(tz);
        self
    }

    /// Projects selected per category by `target_pools`.
    #[must_use]
    pub fn catalog(mut self, catalog: TargetCatalog) -> Self {
        self.cfg.catalog = catalog;
        self
    }

    /// Build the `Dashboard`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector) or if `months` is zero or
    /// above `MAX_MONTH_COUNT`.
    pub fn build(self) -> Result<Dashboard, YieldError> {
        if self.connectors.is_empty() {
            return Err(YieldError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        checked_months(self.cfg.months)?;
        Ok(Dashboard {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

pub(crate) fn checked_months(months: usize) -> Result<usize, YieldError> {
    if months == 0 {
        return Err(YieldError::InvalidArg("months must be at least 1".into()));
    }
    if months > MAX_MONTH_COUNT {
        return Err(YieldError::InvalidArg(format!(
            "months must be at most {MAX_MONTH_COUNT}"
        )));
    }
    Ok(months)
}

/// Attribute an untagged provider error to `connector`.
///
/// Routing-relevant variants pass through unchanged; everything else becomes
/// `Connector { connector, msg }`.
pub fn tag_err(connector: &str, e: YieldError) -> YieldError {
    match e {
        e @ (YieldError::NotFound { .. }
        | YieldError::ProviderTimeout { .. }
        | YieldError::Connector { .. }
        | YieldError::RequestTimeout { .. }
        | YieldError::AllProvidersTimedOut { .. }
        | YieldError::AllProvidersFailed(_)) => e,
        other => YieldError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, bounded by `deadline` when one is set.
///
/// On expiry returns `RequestTimeout { capability: "request" }`; callers remap
/// the label to their capability.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    fut: F,
) -> Result<T, YieldError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| YieldError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Dashboard {
    /// Start building a new `Dashboard`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use yieldlens::{Dashboard, FetchStrategy};
    ///
    /// let dashboard = Dashboard::builder()
    ///     .with_connector(yieldlens_llama::LlamaConnector::new().build()?)
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .months(12)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.cfg
    }

    /// Registered connectors in priority order.
    #[must_use]
    pub fn connectors(&self) -> &[Arc<dyn YieldConnector>] {
        &self.connectors
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "yieldlens::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, YieldError>
    where
        Fut: core::future::Future<Output = Result<T, YieldError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(YieldError::provider_timeout(connector_name, capability.as_str())))
    }

    /// Single-result fetch across connectors.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies the per-provider timeout in both modes and the request deadline
    ///   around the whole operation
    /// - `call` returns `None` for connectors that lack the capability; those are
    ///   skipped and do not count as attempts
    /// - Failures collapse through [`collapse_errors`]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "yieldlens::core::fetch_single",
            skip(self, call),
            fields(capability = %capability, not_found = %not_found_what),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, YieldError>
    where
        T: Send,
        F: Fn(Arc<dyn YieldConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, YieldError>> + Send,
    {
        let run = async {
            match self.cfg.fetch_strategy {
                FetchStrategy::PriorityWithFallback => {
                    self.fetch_single_priority_with_fallback(capability, not_found_what, call)
                        .await
                }
                FetchStrategy::Latency => {
                    self.fetch_single_latency(capability, not_found_what, call)
                        .await
                }
                _ => unreachable!("all FetchStrategy variants are handled above"),
            }
        };
        match with_request_deadline(self.cfg.request_timeout, run).await {
            Ok(res) => res,
            Err(_) => Err(YieldError::request_timeout(capability.as_str())),
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, YieldError>
    where
        T: Send,
        F: Fn(Arc<dyn YieldConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, YieldError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<YieldError> = Vec::new();

        for c in &self.connectors {
            let Some(fut) = call(Arc::clone(c)) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e @ (YieldError::NotFound { .. } | YieldError::ProviderTimeout { .. })) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "provider miss; trying next");
                    errors.push(e);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "provider failed; trying next");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, YieldError>
    where
        T: Send,
        F: Fn(Arc<dyn YieldConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, YieldError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in &self.connectors {
            if let Some(fut) = call(Arc::clone(c)) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability, timeout, fut).await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<YieldError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(e @ (YieldError::ProviderTimeout { .. } | YieldError::NotFound { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }
}
