//! # Scout OpenSearch Shared
//!
//! Plain data types shared by the adapter crates: the query descriptor handed
//! in by callers, the document commands sent to the ingestion endpoint, and
//! the result shapes parsed out of the search response.

pub mod document;
pub mod query;
pub mod results;

pub use document::{CommandKind, DocumentCommand, DocumentId, FieldMap, Searchable};
pub use query::{SearchQuery, SortDirective, SortOrder};
pub use results::{ResultEnvelope, ResultItem, SearchResults};
