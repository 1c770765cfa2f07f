//! Engine manager.
//!
//! Maps driver names to search engines, the way the host framework resolves
//! the engine for a searchable model. The OpenSearch engine is registered
//! under [`OPENSEARCH_DRIVER`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::ScoutError;
use scout_opensearch_repository::{OpenSearchConfig, OpenSearchEngine, SearchEngine};
use scout_opensearch_shared::Searchable;

/// Driver name the OpenSearch engine is registered under.
pub const OPENSEARCH_DRIVER: &str = "opensearch";

/// Registry of search engines for records of type `R`.
pub struct EngineManager<R> {
    engines: HashMap<String, Arc<dyn SearchEngine<R>>>,
    default_driver: String,
}

impl<R> Default for EngineManager<R>
where
    R: Searchable + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> EngineManager<R>
where
    R: Searchable + 'static,
{
    /// Create an empty manager whose default driver is `opensearch`.
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            default_driver: OPENSEARCH_DRIVER.to_string(),
        }
    }

    /// Register `engine` under `name`, replacing any engine already there.
    pub fn extend(
        &mut self,
        name: impl Into<String>,
        engine: Arc<dyn SearchEngine<R>>,
    ) -> &mut Self {
        let name = name.into();
        info!(driver = %name, "Registered search engine");
        self.engines.insert(name, engine);
        self
    }

    /// Build the OpenSearch engine from `config` and register it.
    pub fn register_opensearch(
        &mut self,
        config: OpenSearchConfig,
    ) -> Result<&mut Self, ScoutError> {
        let engine: OpenSearchEngine<R> = OpenSearchEngine::new(config)?;
        Ok(self.extend(OPENSEARCH_DRIVER, Arc::new(engine)))
    }

    /// The engine registered under `name`.
    pub fn engine(&self, name: &str) -> Result<Arc<dyn SearchEngine<R>>, ScoutError> {
        self.engines
            .get(name)
            .cloned()
            .ok_or_else(|| ScoutError::UnknownDriver(name.to_string()))
    }

    /// The engine registered under the default driver name.
    pub fn default_engine(&self) -> Result<Arc<dyn SearchEngine<R>>, ScoutError> {
        self.engine(&self.default_driver)
    }

    pub fn default_driver(&self) -> &str {
        &self.default_driver
    }

    pub fn set_default_driver(&mut self, name: impl Into<String>) {
        self.default_driver = name.into();
    }

    /// Registered driver names, sorted.
    pub fn drivers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
