#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use yieldlens_core::{ChartPoint, RawPool, YieldError};

/// Public DeFiLlama yields API.
pub const DEFAULT_BASE_URL: &str = "https://yields.llama.fi";

const CONNECTOR: &str = "yieldlens-llama";

/// Pool listing abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait LlamaPools: Send + Sync {
    /// Fetch every pool tracked by the API.
    async fn fetch_pools(&self) -> Result<Vec<RawPool>, YieldError>;
}

/// Chart abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait LlamaChart: Send + Sync {
    /// Fetch the historical chart of `pool_id`.
    async fn fetch_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError>;
}

/// `{ "status": "...", "data": [...] }` wrapper used by every yields endpoint.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Option<String>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Real adapter backed by a shared `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections internally.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: String,
}

impl RealAdapter {
    /// Adapter for the public API with a default HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new(reqwest::Client::new())
    }

    /// Adapter for the public API using `http`.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Adapter for a custom API root (mirrors, local test servers).
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` is not an absolute URL that can carry a path.
    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Result<Self, YieldError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| YieldError::InvalidArg(format!("invalid base url {base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(YieldError::InvalidArg(format!(
                "base url cannot carry a path: {base_url}"
            )));
        }
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API root this adapter talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, YieldError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| YieldError::InvalidArg(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| YieldError::InvalidArg("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<Vec<T>, YieldError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, context))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(map_status(status, context));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| map_transport_err(&e, context))?;
        let env: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| YieldError::Data(format!("{context}: {e}")))?;
        match env.status.as_deref() {
            None | Some("success") => Ok(env.data),
            Some(other) => Err(YieldError::connector(
                CONNECTOR,
                format!("api status {other}: {context}"),
            )),
        }
    }
}

fn map_status(status: reqwest::StatusCode, context: &str) -> YieldError {
    match status.as_u16() {
        404 => YieldError::not_found(context.to_string()),
        429 => YieldError::connector(CONNECTOR, format!("rate limit: {context}")),
        s if status.is_server_error() => {
            YieldError::connector(CONNECTOR, format!("server error {s}: {context}"))
        }
        s => YieldError::connector(CONNECTOR, format!("status {s}: {context}")),
    }
}

fn map_transport_err(e: &reqwest::Error, context: &str) -> YieldError {
    if e.is_decode() {
        YieldError::Data(format!("{context}: {e}"))
    } else {
        YieldError::connector(CONNECTOR, format!("{context}: {e}"))
    }
}

#[async_trait]
impl LlamaPools for RealAdapter {
    async fn fetch_pools(&self) -> Result<Vec<RawPool>, YieldError> {
        let url = self.endpoint(&["pools"])?;
        self.get_data(url, "pools").await
    }
}

#[async_trait]
impl LlamaChart for RealAdapter {
    async fn fetch_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        let url = self.endpoint(&["chart", pool_id])?;
        self.get_data(url, &format!("chart for pool {pool_id}"))
            .await
    }
}

#[cfg(feature = "test-adapters")]
impl dyn LlamaPools {
    /// Build a `LlamaPools` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn LlamaPools>
    where
        F: Send + Sync + 'static + Fn() -> Result<Vec<RawPool>, YieldError>,
    {
        struct FnPools<F>(F);
        #[async_trait]
        impl<F> LlamaPools for FnPools<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Vec<RawPool>, YieldError>,
        {
            async fn fetch_pools(&self) -> Result<Vec<RawPool>, YieldError> {
                (self.0)()
            }
        }
        Arc::new(FnPools(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn LlamaChart {
    /// Build a `LlamaChart` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn LlamaChart>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<Vec<ChartPoint>, YieldError>,
    {
        struct FnChart<F>(F);
        #[async_trait]
        impl<F> LlamaChart for FnChart<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<Vec<ChartPoint>, YieldError>,
        {
            async fn fetch_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
                (self.0)(pool_id.to_string())
            }
        }
        Arc::new(FnChart(f))
    }
}

/// Hands out shared adapter handles; unimplemented endpoints report `Unsupported`.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn LlamaPools>`.
    fn clone_arc_pools(&self) -> Arc<dyn LlamaPools> {
        <dyn LlamaPools>::from_fn(|| Err(YieldError::unsupported("pools")))
    }
    /// Clone as `Arc<dyn LlamaChart>`.
    fn clone_arc_chart(&self) -> Arc<dyn LlamaChart> {
        <dyn LlamaChart>::from_fn(|_| Err(YieldError::unsupported("chart")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_pools(&self) -> Arc<dyn LlamaPools> {
        Arc::new(self.clone()) as Arc<dyn LlamaPools>
    }
    fn clone_arc_chart(&self) -> Arc<dyn LlamaChart> {
        Arc::new(self.clone()) as Arc<dyn LlamaChart>
    }
}
