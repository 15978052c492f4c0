//! Core types and configuration for helm2bundle.
//!
//! This crate defines the chart metadata record read from `Chart.yaml`
//! ([`ChartMetadata`]), the `helm2bundle.toml` schema ([`BundleConfig`]),
//! and shared error types.

pub mod chart;
pub mod config;
pub mod error;

pub use chart::ChartMetadata;
pub use config::{BuildConfig, BundleConfig};
pub use error::{Error, Result};
