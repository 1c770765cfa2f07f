//! Record store trait definition.

use async_trait::async_trait;

use crate::errors::SearchError;
use scout_opensearch_shared::DocumentId;

/// Source of truth the search hits are hydrated from.
///
/// Records may come back in any order and ids with no record are simply
/// absent from the output.
#[async_trait]
pub trait RecordStore<R>: Send + Sync
where
    R: Send,
{
    async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<R>, SearchError>;
}
