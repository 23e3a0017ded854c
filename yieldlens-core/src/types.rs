//! Re-export of foundational types from `yieldlens-types`.
// Consolidated re-exports so downstream crates can depend on `yieldlens-core` only

pub use yieldlens_types::{Capability, ConnectorKey, YieldError};

pub use yieldlens_types::{CacheConfig, DashboardConfig, FetchStrategy, TargetCatalog};

pub use yieldlens_types::{CategoryStats, Pool, PoolCategory, Predictions, RawPool};

pub use yieldlens_types::{ChartMetrics, ChartPoint, ChartTimestamp, MonthKey, MonthlyPoint};

pub use yieldlens_types::{UserAuth, WalletConnection};
