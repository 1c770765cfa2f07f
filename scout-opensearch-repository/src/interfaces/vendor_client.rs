//! Vendor client trait definitions.
//!
//! These traits describe the three endpoints of the search platform the
//! engine talks to. `OpenSearchClient` implements all of them over HTTP;
//! tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::opensearch::SearchParams;
use scout_opensearch_shared::SearchResults;

/// Document ingestion endpoint.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Submit a JSON array of document commands to `app_name`/`table_name`.
    async fn push(
        &self,
        payload: &str,
        app_name: &str,
        table_name: &str,
    ) -> Result<(), SearchError>;
}

/// Search endpoint.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a built search request and return the raw response.
    async fn execute(&self, params: &SearchParams) -> Result<SearchResults, SearchError>;
}

/// Suggestion (drop-down completion) endpoint.
#[async_trait]
pub trait SuggestClient: Send + Sync {
    /// Return up to `hits` completions for `prefix`, best first.
    async fn suggest(
        &self,
        app_name: &str,
        suggest_name: &str,
        prefix: &str,
        hits: usize,
    ) -> Result<Vec<String>, SearchError>;
}
