//! OpenSearch implementation of the `SearchEngine` trait.
//!
//! The engine is a thin coordinator: it translates queries into
//! `SearchParams`, hands document batches to the `DocumentClient`, and maps
//! raw results back to ids and records. All network traffic goes through the
//! injected vendor clients.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::OpenSearchConfig;
use crate::errors::SearchError;
use crate::interfaces::{DocumentClient, RecordStore, SearchClient, SearchEngine, SuggestClient};
use crate::opensearch::client::OpenSearchClient;
use crate::opensearch::documents::prepare_batch;
use crate::opensearch::params::{page_offset, SearchParams};
use crate::opensearch::results::{map_ids, order_by_rank, total_count};
use scout_opensearch_shared::{CommandKind, DocumentId, SearchQuery, SearchResults, Searchable};

/// Search engine backed by Aliyun OpenSearch, for records of type `R`.
pub struct OpenSearchEngine<R> {
    documents: Arc<dyn DocumentClient>,
    search: Arc<dyn SearchClient>,
    suggest: Arc<dyn SuggestClient>,
    config: OpenSearchConfig,
    _records: PhantomData<fn() -> R>,
}

impl<R> OpenSearchEngine<R> {
    /// Create an engine talking to the endpoint in `config`.
    pub fn new(config: OpenSearchConfig) -> Result<Self, SearchError> {
        let client = Arc::new(OpenSearchClient::new(&config)?);
        Ok(Self::with_clients(client.clone(), client.clone(), client, config))
    }

    /// Create an engine from already constructed vendor clients.
    pub fn with_clients(
        documents: Arc<dyn DocumentClient>,
        search: Arc<dyn SearchClient>,
        suggest: Arc<dyn SuggestClient>,
        config: OpenSearchConfig,
    ) -> Self {
        Self {
            documents,
            search,
            suggest,
            config,
            _records: PhantomData,
        }
    }

    pub fn config(&self) -> &OpenSearchConfig {
        &self.config
    }

    /// Drop-down completions for `prefix` from the suggester `suggest_name`.
    #[instrument(skip(self))]
    pub async fn suggest(
        &self,
        app_name: &str,
        suggest_name: &str,
        prefix: &str,
        hits: usize,
    ) -> Result<Vec<String>, SearchError> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        self.suggest
            .suggest(app_name, suggest_name, prefix, hits)
            .await
    }

    async fn submit(&self, records: &[R], kind: CommandKind) -> Result<(), SearchError>
    where
        R: Searchable,
    {
        let Some(batch) = prepare_batch(records, kind)? else {
            debug!(cmd = %kind, records = records.len(), "Nothing to submit");
            return Ok(());
        };

        debug!(
            cmd = %kind,
            app_name = %batch.app_name,
            table_name = %batch.table_name,
            commands = batch.len,
            skipped = records.len() - batch.len,
            "Submitting document batch"
        );

        self.documents
            .push(&batch.payload, &batch.app_name, &batch.table_name)
            .await
    }

    async fn execute(&self, params: SearchParams) -> Result<SearchResults, SearchError> {
        debug!(
            app_name = %params.app_name,
            start = params.start,
            hits = params.hits,
            "Executing search"
        );
        self.search.execute(&params).await
    }
}

#[async_trait]
impl<R> SearchEngine<R> for OpenSearchEngine<R>
where
    R: Searchable + 'static,
{
    #[instrument(skip(self, records), fields(records = records.len()))]
    async fn update(&self, records: &[R]) -> Result<(), SearchError> {
        self.submit(records, CommandKind::Add).await
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    async fn delete(&self, records: &[R]) -> Result<(), SearchError> {
        self.submit(records, CommandKind::Delete).await
    }

    #[instrument(skip(self, query), fields(query = %query.query))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let hits = query.limit.unwrap_or(self.config.default_hits);
        let params = SearchParams::build(query, 0, hits)?;
        self.execute(params).await
    }

    #[instrument(skip(self, query), fields(query = %query.query))]
    async fn paginate(
        &self,
        query: &SearchQuery,
        per_page: usize,
        page: usize,
    ) -> Result<SearchResults, SearchError> {
        let params = SearchParams::build(query, page_offset(per_page, page), per_page)?;
        self.execute(params).await
    }

    fn map_ids(&self, results: &SearchResults) -> Vec<DocumentId> {
        map_ids(results, &self.config.key_field)
    }

    #[instrument(skip_all)]
    async fn map(
        &self,
        _query: &SearchQuery,
        results: &SearchResults,
        store: &dyn RecordStore<R>,
    ) -> Result<Vec<R>, SearchError> {
        let ids = map_ids(results, &self.config.key_field);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = store.find_many(&ids).await?;
        let found = records.len();
        let ordered = order_by_rank(&ids, records);

        debug!(ids = ids.len(), found, mapped = ordered.len(), "Mapped results");
        Ok(ordered)
    }

    fn get_total_count(&self, results: &SearchResults) -> u64 {
        total_count(results)
    }

    async fn flush(&self) -> Result<(), SearchError> {
        debug!("Flush is not supported by OpenSearch, ignoring");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_opensearch_shared::FieldMap;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Product {
        id: u64,
        name: &'static str,
    }

    impl Searchable for Product {
        fn search_key(&self) -> DocumentId {
            DocumentId::from(self.id)
        }

        fn to_searchable_fields(&self) -> FieldMap {
            let mut fields = FieldMap::new();
            if !self.name.is_empty() {
                fields.insert("id".to_string(), json!(self.id));
                fields.insert("name".to_string(), json!(self.name));
            }
            fields
        }

        fn search_app_name(&self) -> String {
            "shop".to_string()
        }

        fn search_table_name(&self) -> String {
            "products".to_string()
        }
    }

    /// Mock vendor client recording every call.
    #[derive(Default)]
    struct MockClient {
        pushes: Arc<Mutex<Vec<(String, String, String)>>>,
        searches: Arc<Mutex<Vec<SearchParams>>>,
        response: Option<String>,
        should_fail: bool,
    }

    impl MockClient {
        fn responding(body: Value) -> Self {
            Self {
                response: Some(body.to_string()),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl DocumentClient for MockClient {
        async fn push(
            &self,
            payload: &str,
            app_name: &str,
            table_name: &str,
        ) -> Result<(), SearchError> {
            if self.should_fail {
                return Err(SearchError::vendor("Mock failure"));
            }
            self.pushes.lock().await.push((
                payload.to_string(),
                app_name.to_string(),
                table_name.to_string(),
            ));
            Ok(())
        }
    }

    #[async_trait]
    impl SearchClient for MockClient {
        async fn execute(&self, params: &SearchParams) -> Result<SearchResults, SearchError> {
            if self.should_fail {
                return Err(SearchError::connection("Mock failure"));
            }
            self.searches.lock().await.push(params.clone());
            Ok(self
                .response
                .clone()
                .map(SearchResults::Raw)
                .unwrap_or_default())
        }
    }

    #[async_trait]
    impl SuggestClient for MockClient {
        async fn suggest(
            &self,
            _app_name: &str,
            _suggest_name: &str,
            prefix: &str,
            hits: usize,
        ) -> Result<Vec<String>, SearchError> {
            Ok((0..hits).map(|i| format!("{}{}", prefix, i)).collect())
        }
    }

    /// Record store returning its matches in reverse order.
    struct MockStore {
        records: Vec<Product>,
        calls: AtomicUsize,
    }

    impl MockStore {
        fn new(records: Vec<Product>) -> Self {
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RecordStore<Product> for MockStore {
        async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<Product>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .iter()
                .rev()
                .filter(|record| ids.contains(&record.search_key()))
                .cloned()
                .collect())
        }
    }

    fn engine(client: MockClient) -> (OpenSearchEngine<Product>, Arc<MockClient>) {
        let client = Arc::new(client);
        let engine = OpenSearchEngine::with_clients(
            client.clone(),
            client.clone(),
            client.clone(),
            OpenSearchConfig::new("key", "secret", "http://localhost"),
        );
        (engine, client)
    }

    fn hits(ids: &[Value]) -> Value {
        let items: Vec<Value> = ids.iter().map(|id| json!({"fields": {"id": id}})).collect();
        json!({
            "status": "OK",
            "result": {"total": ids.len(), "num": ids.len(), "items": items}
        })
    }

    fn query() -> SearchQuery {
        SearchQuery::new("shoes").within("shop")
    }

    #[tokio::test]
    async fn test_update_pushes_non_empty_records() {
        let (engine, client) = engine(MockClient::default());
        let records = vec![
            Product { id: 1, name: "boots" },
            Product { id: 2, name: "" },
            Product { id: 3, name: "sandals" },
        ];

        engine.update(&records).await.unwrap();

        let pushes = client.pushes.lock().await;
        assert_eq!(pushes.len(), 1);

        let (payload, app_name, table_name) = &pushes[0];
        assert_eq!(app_name, "shop");
        assert_eq!(table_name, "products");

        let payload: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(
            payload,
            json!([
                {"cmd": "ADD", "fields": {"id": 1, "name": "boots"}},
                {"cmd": "ADD", "fields": {"id": 3, "name": "sandals"}}
            ])
        );
    }

    #[tokio::test]
    async fn test_delete_uses_delete_commands() {
        let (engine, client) = engine(MockClient::default());

        engine
            .delete(&[Product { id: 7, name: "clogs" }])
            .await
            .unwrap();

        let pushes = client.pushes.lock().await;
        let payload: Value = serde_json::from_str(&pushes[0].0).unwrap();
        assert_eq!(payload[0]["cmd"], "DELETE");
    }

    #[tokio::test]
    async fn test_empty_batches_make_no_call() {
        let (engine, client) = engine(MockClient::default());

        engine.update(&[]).await.unwrap();
        engine.delete(&[]).await.unwrap();
        engine.update(&[Product { id: 1, name: "" }]).await.unwrap();

        assert!(client.pushes.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_push_failure_propagates() {
        let (engine, _) = engine(MockClient::failing());

        let result = engine.update(&[Product { id: 1, name: "boots" }]).await;

        assert!(matches!(result, Err(SearchError::VendorError(_))));
    }

    #[tokio::test]
    async fn test_search_uses_default_hits() {
        let (engine, client) = engine(MockClient::default());

        engine.search(&query()).await.unwrap();

        let searches = client.searches.lock().await;
        assert_eq!(searches[0].start, 0);
        assert_eq!(searches[0].hits, 20);
        assert_eq!(searches[0].app_name, "shop");
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let (engine, client) = engine(MockClient::default());

        engine.search(&query().take(5)).await.unwrap();

        assert_eq!(client.searches.lock().await[0].hits, 5);
    }

    #[tokio::test]
    async fn test_paginate_second_page() {
        let (engine, client) = engine(MockClient::default());

        engine.paginate(&query(), 10, 2).await.unwrap();

        let searches = client.searches.lock().await;
        assert_eq!(searches[0].start, 10);
        assert_eq!(searches[0].hits, 10);
        assert_eq!(searches[0].query, "'shoes'");
    }

    #[tokio::test]
    async fn test_missing_app_name_makes_no_call() {
        let (engine, client) = engine(MockClient::default());

        let result = engine.search(&SearchQuery::new("shoes")).await;
        assert!(matches!(result, Err(SearchError::MissingAppName)));

        let result = engine.paginate(&SearchQuery::new("shoes"), 10, 1).await;
        assert!(matches!(result, Err(SearchError::MissingAppName)));

        assert!(client.searches.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let (engine, _) = engine(MockClient::failing());

        let result = engine.search(&query()).await;

        assert!(matches!(result, Err(SearchError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_map_restores_rank_order() {
        let (engine, _) = engine(MockClient::default());
        let store = MockStore::new(vec![
            Product { id: 1, name: "a" },
            Product { id: 2, name: "b" },
            Product { id: 3, name: "c" },
        ]);
        let results = SearchResults::Raw(hits(&[json!("2"), json!(3), json!(1)]).to_string());

        let records = engine.map(&query(), &results, &store).await.unwrap();

        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_map_omits_missing_records() {
        let (engine, _) = engine(MockClient::default());
        let store = MockStore::new(vec![
            Product { id: 1, name: "a" },
            Product { id: 3, name: "c" },
        ]);
        let results = SearchResults::Raw(hits(&[json!(3), json!(2), json!(1)]).to_string());

        let records = engine.map(&query(), &results, &store).await.unwrap();

        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_map_without_hits_skips_store() {
        let (engine, _) = engine(MockClient::default());
        let store = MockStore::new(vec![Product { id: 1, name: "a" }]);

        for results in [
            SearchResults::Empty,
            SearchResults::Raw("garbage".to_string()),
            SearchResults::Raw(hits(&[]).to_string()),
        ] {
            let records = engine.map(&query(), &results, &store).await.unwrap();
            assert!(records.is_empty());
        }

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_map_ids_and_total_count() {
        let (engine, _) = engine(MockClient::default());
        let results = SearchResults::Raw(hits(&[json!(4), json!(8)]).to_string());

        assert_eq!(
            engine.map_ids(&results),
            vec![DocumentId::from(4), DocumentId::from(8)]
        );
        assert_eq!(engine.get_total_count(&results), 2);
        assert_eq!(engine.get_total_count(&SearchResults::Empty), 0);
    }

    #[tokio::test]
    async fn test_keys_and_get() {
        let (engine, _) = engine(MockClient::responding(hits(&[json!(3), json!(1)])));
        let store = MockStore::new(vec![
            Product { id: 1, name: "a" },
            Product { id: 3, name: "c" },
        ]);

        let keys = engine.keys(&query()).await.unwrap();
        assert_eq!(keys, vec![DocumentId::from(3), DocumentId::from(1)]);

        let records = engine.get(&query(), &store).await.unwrap();
        assert_eq!(
            records,
            vec![Product { id: 3, name: "c" }, Product { id: 1, name: "a" }]
        );
    }

    #[tokio::test]
    async fn test_flush_is_noop() {
        let (engine, client) = engine(MockClient::default());

        engine.flush().await.unwrap();

        assert!(client.pushes.lock().await.is_empty());
        assert!(client.searches.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_suggest() {
        let (engine, _) = engine(MockClient::default());

        let suggestions = engine.suggest("shop", "title", "sho", 2).await.unwrap();
        assert_eq!(suggestions, vec!["sho0".to_string(), "sho1".to_string()]);

        let suggestions = engine.suggest("shop", "title", "", 2).await.unwrap();
        assert!(suggestions.is_empty());
    }
}
