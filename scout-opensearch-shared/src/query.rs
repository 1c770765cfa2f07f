//! Query descriptor passed in by callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Searchable;

/// Sort direction for a single sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A field to sort on and the direction to sort it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: String,
    pub order: SortOrder,
}

impl SortDirective {
    /// Sort `field` in ascending order.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    /// Sort `field` in descending order.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }
}

/// Structured description of a search request.
///
/// Besides the free-text term, filters, sorting and limit, the query carries
/// the metadata of the model being searched: the application name the
/// model's documents live under and the model's preferred sort field. A query
/// without an application name cannot be translated into a vendor request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The free-text term.
    pub query: String,
    /// Optional field (vendor index) the term is restricted to.
    pub index: Option<String>,
    /// Equality predicates, in the order they were added.
    pub filters: Vec<(String, Value)>,
    /// Explicit sort directives, in priority order.
    pub sorts: Vec<SortDirective>,
    /// Number of hits requested by a non-paginated search.
    pub limit: Option<usize>,
    /// Application name of the model being searched.
    pub app_name: Option<String>,
    /// Preferred sort field of the model being searched.
    pub sort_field: Option<String>,
}

impl SearchQuery {
    /// Create a query for the given term with no model metadata attached.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Create a query whose model metadata is taken from `record`.
    pub fn for_record<R: Searchable + ?Sized>(query: impl Into<String>, record: &R) -> Self {
        Self {
            query: query.into(),
            app_name: Some(record.search_app_name()),
            sort_field: record.sort_field(),
            ..Default::default()
        }
    }

    /// Set the application name to search in.
    pub fn within(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Restrict the term to a single field.
    pub fn in_field(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Add an equality filter.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Add an explicit sort directive.
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sorts.push(SortDirective {
            field: field.into(),
            order,
        });
        self
    }

    /// Set the preferred sort field used when no explicit sort is given.
    pub fn prefer_sort(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// Limit the number of hits returned by a non-paginated search.
    pub fn take(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
