//! yieldlens-core
//!
//! Core types, traits, and utilities shared across the yieldlens workspace.
//!
//! - `types`: pool, chart and configuration structures re-exported from `yieldlens-types`.
//! - `connector`: the `YieldConnector` trait and capability provider traits.
//! - `timeseries`: timestamp normalization and the monthly APY resampler.
//! - `catalog`: target-project selection and built-in fallback pools.
//! - `access`: session state and the `WalletProvider` capability interface.
//! - `format`: display helpers for TVL, APY and project badges.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Connector and wallet traits are async (`async-trait`). The workspace's
//! orchestrator and HTTP connector run them under a Tokio 1.x runtime; the
//! resampler and the catalog helpers are synchronous and runtime-agnostic.
#![warn(missing_docs)]

/// Session state and wallet capability interface.
pub mod access;
/// Target-project catalog, pool selection and fallback pools.
pub mod catalog;
/// Connector capability traits and the primary `YieldConnector` interface.
pub mod connector;
/// Display formatting helpers.
pub mod format;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Time-series utilities for normalizing and resampling chart samples.
pub mod timeseries;
pub mod types;

pub use access::{Session, WalletAccounts, WalletProvider};
pub use catalog::{
    category_stats, example_pools, pools_in_category, project_matches, sample_pools,
    select_target_pools,
};
pub use connector::YieldConnector;
pub use format::{format_apy, format_tvl, project_initials};
pub use middleware::Middleware;
pub use timeseries::monthly::{
    MAX_MONTH_COUNT, resample_monthly, resample_monthly_at, resample_monthly_in,
};
pub use timeseries::normalize::normalize_timestamp_ms;
pub use types::*;
