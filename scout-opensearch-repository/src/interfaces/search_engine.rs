//! Search engine trait definition.
//!
//! This module defines the capability interface a search driver implements
//! for the host application: pushing and removing records, running searches,
//! and turning the raw results back into ids, records and counts.

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::interfaces::RecordStore;
use scout_opensearch_shared::{DocumentId, SearchQuery, SearchResults, Searchable};

/// Abstract interface for a search driver over records of type `R`.
///
/// Implementations can be swapped for different backends (OpenSearch, mock,
/// etc.) and are registered with the engine manager under a driver name.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// Mapping operations never fail on a malformed or absent result: they
/// behave as if nothing matched. Operations that reach the platform return
/// its failures unchanged.
#[async_trait]
pub trait SearchEngine<R>: Send + Sync
where
    R: Searchable + 'static,
{
    /// Add or replace `records` in the index. An empty slice is a no-op.
    async fn update(&self, records: &[R]) -> Result<(), SearchError>;

    /// Remove `records` from the index. An empty slice is a no-op.
    async fn delete(&self, records: &[R]) -> Result<(), SearchError>;

    /// Run `query` and return the first page of raw results.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError>;

    /// Run `query` for the 1-based `page` of `per_page` hits.
    async fn paginate(
        &self,
        query: &SearchQuery,
        per_page: usize,
        page: usize,
    ) -> Result<SearchResults, SearchError>;

    /// Identifiers of the hits, in rank order.
    fn map_ids(&self, results: &SearchResults) -> Vec<DocumentId>;

    /// Records for the hits, hydrated through `store` and kept in rank order.
    ///
    /// Hits whose record is missing from the store are left out.
    async fn map(
        &self,
        query: &SearchQuery,
        results: &SearchResults,
        store: &dyn RecordStore<R>,
    ) -> Result<Vec<R>, SearchError>;

    /// Total number of matches across all pages.
    fn get_total_count(&self, results: &SearchResults) -> u64;

    /// Remove every record of type `R` from the index.
    async fn flush(&self) -> Result<(), SearchError>;

    /// Run `query` and return the matching identifiers.
    async fn keys(&self, query: &SearchQuery) -> Result<Vec<DocumentId>, SearchError> {
        let results = self.search(query).await?;
        Ok(self.map_ids(&results))
    }

    /// Run `query` and return the matching records.
    async fn get(
        &self,
        query: &SearchQuery,
        store: &dyn RecordStore<R>,
    ) -> Result<Vec<R>, SearchError> {
        let results = self.search(query).await?;
        self.map(query, &results, store).await
    }
}
