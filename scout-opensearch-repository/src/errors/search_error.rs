//! Search error types.
//!
//! This module defines the error types that can occur while talking to the
//! search platform or translating requests for it.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// The client configuration is unusable (missing credentials, bad host).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request never reached the platform, or the response never arrived.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The platform answered with an error status.
    #[error("Vendor error: {0}")]
    VendorError(String),

    /// The query carries no application name to search in.
    #[error("Search query has no application name")]
    MissingAppName,

    /// Failed to serialize data for the platform.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The record store failed to hydrate search hits.
    #[error("Record store error: {0}")]
    RecordStoreError(String),
}

impl SearchError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a vendor error.
    pub fn vendor(msg: impl Into<String>) -> Self {
        Self::VendorError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a record store error.
    pub fn record_store(msg: impl Into<String>) -> Self {
        Self::RecordStoreError(msg.into())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
