//! Aliyun OpenSearch implementation of the search engine.
//!
//! This module provides the signed HTTP client for the v3 API and the
//! `OpenSearchEngine` built on it, together with the pieces the engine is
//! made of: query translation, result mapping and document batching.

mod client;
mod documents;
mod engine;
mod params;
mod results;
mod signer;

pub use client::OpenSearchClient;
pub use documents::{build_commands, prepare_batch, DocumentBatch};
pub use engine::OpenSearchEngine;
pub use params::{page_offset, ResponseFormat, SearchParams, RELEVANCE_FIELD};
pub use results::{map_ids, order_by_rank, parse_envelope, total_count};
pub use signer::{RequestSigner, SignedRequest};
