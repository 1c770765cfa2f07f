//! # Scout OpenSearch
//!
//! Aliyun OpenSearch driver for Scout-style model search.
//!
//! This crate wires the OpenSearch engine from the environment and registers
//! it with an [`EngineManager`] under the `opensearch` driver name.

pub mod config;
pub mod manager;
pub mod telemetry;

pub use config::Dependencies;
pub use manager::{EngineManager, OPENSEARCH_DRIVER};

use thiserror::Error;

/// Errors that can occur while configuring or resolving search engines.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No engine is registered under the requested driver name.
    #[error("Unknown search driver: {0}")]
    UnknownDriver(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] scout_opensearch_repository::SearchError),
}

impl ScoutError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
