//! Interface definitions for the search adapter.
//!
//! This module defines the `SearchEngine` capability trait the host
//! application calls, the `RecordStore` it hydrates results from, and the
//! vendor client traits the engine is built on, allowing for dependency
//! injection and swappable implementations.

mod record_store;
mod search_engine;
mod vendor_client;

pub use record_store::RecordStore;
pub use search_engine::SearchEngine;
pub use vendor_client::{DocumentClient, SearchClient, SuggestClient};
