//! Time-series utilities shared by connectors and the dashboard.
//!
//! Modules include:
//! - `normalize`: resolve string/number sample timestamps to one epoch unit
//! - `monthly`: align irregular samples into a fixed-length monthly series
/// Monthly bucketing and nearest-neighbor gap filling.
pub mod monthly;
/// Timestamp normalization helpers.
pub mod normalize;
