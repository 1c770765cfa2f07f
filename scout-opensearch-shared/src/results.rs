//! Search results as returned by a search and consumed by the mapping operations.

use serde::{Deserialize, Serialize};

use crate::document::{DocumentId, FieldMap};

/// What a search hands back to the caller.
///
/// `Raw` holds the vendor response body untouched; it is only decoded when one
/// of the mapping operations needs it. `Empty` stands in for "no response".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResults {
    Raw(String),
    #[default]
    Empty,
}

/// A single hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub fields: FieldMap,
}

impl ResultItem {
    /// Identifier stored under `key_field`, if the hit carries one.
    pub fn id(&self, key_field: &str) -> Option<DocumentId> {
        self.fields.get(key_field).and_then(DocumentId::from_value)
    }
}

/// Decoded result payload: total match count and the hits in rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultEnvelope {
    /// Total number of matches across all pages.
    pub total: u64,
    /// Number of hits in this page.
    pub num: u64,
    /// Hits, in the vendor's rank order.
    pub items: Vec<ResultItem>,
}

impl ResultEnvelope {
    /// Identifiers of the hits, in rank order. Hits without an id are skipped.
    pub fn ids(&self, key_field: &str) -> Vec<DocumentId> {
        if self.total == 0 {
            return Vec::new();
        }
        self.items
            .iter()
            .filter_map(|item| item.id(key_field))
            .collect()
    }
}
