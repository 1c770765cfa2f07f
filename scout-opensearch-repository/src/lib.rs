//! # Scout OpenSearch Repository
//!
//! This crate provides the search engine capability traits and their
//! implementation over Aliyun OpenSearch. It includes definitions for errors,
//! configuration, interfaces, and the signed HTTP client the engine uses.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::OpenSearchConfig;
pub use errors::SearchError;
pub use interfaces::{DocumentClient, RecordStore, SearchClient, SearchEngine, SuggestClient};
pub use opensearch::{OpenSearchClient, OpenSearchEngine, SearchParams};
