//! OpenSearch search request builder.
//!
//! This module turns a `SearchQuery` into the parameters of a search
//! request: the query clause, paging window, sort and filter clauses.

use serde_json::Value;

use crate::errors::SearchError;
use scout_opensearch_shared::{SearchQuery, SortDirective, SortOrder};

/// Relevance field sorted on when nothing else is specified.
pub const RELEVANCE_FIELD: &str = "RANK";

/// Response format requested from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    FullJson,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::FullJson => "fulljson",
        }
    }
}

/// A fully translated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Application to search in.
    pub app_name: String,
    /// Query clause, e.g. `title:'shoes'`.
    pub query: String,
    /// Offset of the first hit.
    pub start: usize,
    /// Number of hits requested.
    pub hits: usize,
    pub format: ResponseFormat,
    /// Sort directives, never empty.
    pub sorts: Vec<SortDirective>,
    /// Rendered filter predicates, in the caller's order.
    pub filters: Vec<String>,
}

impl SearchParams {
    /// Translate `query` into a request for `hits` hits starting at `start`.
    ///
    /// Fails with `SearchError::MissingAppName` if the query does not say
    /// which application to search in.
    pub fn build(query: &SearchQuery, start: usize, hits: usize) -> Result<Self, SearchError> {
        let app_name = query
            .app_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(SearchError::MissingAppName)?;

        Ok(Self {
            app_name: app_name.to_string(),
            query: query_clause(query),
            start,
            hits,
            format: ResponseFormat::FullJson,
            sorts: sort_directives(query),
            filters: query
                .filters
                .iter()
                .map(|(field, value)| render_filter(field, value))
                .collect(),
        })
    }

    /// Translate `query` for the zero-based `page_index` of `page_size` hits.
    pub fn for_page(
        query: &SearchQuery,
        page_index: usize,
        page_size: usize,
    ) -> Result<Self, SearchError> {
        Self::build(query, page_index.saturating_mul(page_size), page_size)
    }

    /// Render the full request string passed as the `query` URL parameter.
    ///
    /// Clauses are joined with `&&`, e.g.
    /// `config=start:0,hit:20,format:fulljson&&query='shoes'&&sort=-RANK`.
    pub fn to_query_string(&self) -> String {
        let mut clauses = vec![
            format!(
                "config=start:{},hit:{},format:{}",
                self.start,
                self.hits,
                self.format.as_str()
            ),
            format!("query={}", self.query),
        ];

        if !self.sorts.is_empty() {
            let sort = self
                .sorts
                .iter()
                .map(render_sort)
                .collect::<Vec<_>>()
                .join(";");
            clauses.push(format!("sort={}", sort));
        }

        if !self.filters.is_empty() {
            clauses.push(format!("filter={}", self.filters.join(" AND ")));
        }

        clauses.join("&&")
    }
}

/// Offset of the first hit of the 1-based `page`. Page 0 is treated as page 1.
///
/// Offsets past `usize::MAX` saturate.
pub fn page_offset(per_page: usize, page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Build the query clause: `<field>:'<term>'`, or `'<term>'` without a field.
pub fn query_clause(query: &SearchQuery) -> String {
    match query.index.as_deref() {
        Some(index) if !index.is_empty() => format!("{}:'{}'", index, query.query),
        _ => format!("'{}'", query.query),
    }
}

/// Explicit sorts, or a descending sort on the model's preferred field,
/// falling back to relevance.
fn sort_directives(query: &SearchQuery) -> Vec<SortDirective> {
    if !query.sorts.is_empty() {
        return query.sorts.clone();
    }

    let field = query
        .sort_field
        .as_deref()
        .filter(|field| !field.is_empty())
        .unwrap_or(RELEVANCE_FIELD);
    vec![SortDirective::desc(field)]
}

fn render_sort(sort: &SortDirective) -> String {
    match sort.order {
        SortOrder::Ascending => format!("+{}", sort.field),
        SortOrder::Descending => format!("-{}", sort.field),
    }
}

/// Render an equality predicate as `<field>=<value>`.
///
/// Strings are quoted, everything else is written as-is. Values are not
/// escaped.
pub fn render_filter(field: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format!("{}=\"{}\"", field, s),
        other => format!("{}={}", field, other),
    }
}
