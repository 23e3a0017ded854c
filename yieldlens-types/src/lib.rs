//! yieldlens-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod access;
mod capability;
mod chart;
mod config;
mod connector;
mod error;
mod pool;

pub use access::{UserAuth, WalletConnection};
pub use capability::Capability;
pub use chart::{ChartMetrics, ChartPoint, ChartTimestamp, MonthKey, MonthlyPoint};
pub use config::{CacheConfig, DashboardConfig, FetchStrategy, TargetCatalog};
pub use connector::ConnectorKey;
pub use error::YieldError;
pub use pool::{CategoryStats, Pool, PoolCategory, Predictions, RawPool};
