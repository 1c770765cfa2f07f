//! Search response parsing and result mapping.
//!
//! Parsing is tolerant: anything that is not a well-formed, successful
//! response decodes to an empty envelope instead of an error.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use scout_opensearch_shared::{DocumentId, ResultEnvelope, SearchResults, Searchable};

const STATUS_FAIL: &str = "FAIL";

/// Top-level shape of a search response body.
#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Option<ResultEnvelope>,
    #[serde(default)]
    errors: Vec<Value>,
}

/// Decode the raw search response into an envelope.
pub fn parse_envelope(results: &SearchResults) -> ResultEnvelope {
    let raw = match results {
        SearchResults::Raw(raw) => raw,
        SearchResults::Empty => return ResultEnvelope::default(),
    };

    let body: ResponseBody = match serde_json::from_str(raw) {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Unreadable search response, treating as empty");
            return ResultEnvelope::default();
        }
    };

    if body.status.as_deref() == Some(STATUS_FAIL) {
        debug!(errors = ?body.errors, "Search response reported failure, treating as empty");
        return ResultEnvelope::default();
    }

    body.result.unwrap_or_default()
}

/// Identifiers of the hits, in rank order.
pub fn map_ids(results: &SearchResults, key_field: &str) -> Vec<DocumentId> {
    parse_envelope(results).ids(key_field)
}

/// Total match count, 0 for absent or malformed results.
pub fn total_count(results: &SearchResults) -> u64 {
    parse_envelope(results).total
}

/// Arrange `records` in the order of `ids`.
///
/// Records whose key is not in `ids` are dropped, as are ids with no record.
/// When an id appears more than once only its first position is filled.
pub fn order_by_rank<R: Searchable>(ids: &[DocumentId], records: Vec<R>) -> Vec<R> {
    let mut by_key: HashMap<DocumentId, R> = records
        .into_iter()
        .map(|record| (record.search_key(), record))
        .collect();

    ids.iter().filter_map(|id| by_key.remove(id)).collect()
}
