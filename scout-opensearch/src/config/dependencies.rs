//! Dependency initialization and wiring for the OpenSearch driver.

use std::env;

use tracing::info;

use crate::config::load_config_from;
use crate::manager::EngineManager;
use crate::ScoutError;
use scout_opensearch_repository::{OpenSearchConfig, OpenSearchEngine};
use scout_opensearch_shared::Searchable;

/// Container for the configuration every engine is built from.
#[derive(Debug, Clone)]
pub struct Dependencies {
    pub config: OpenSearchConfig,
}

impl Dependencies {
    /// Initialize from environment variables, reading `.env` first if present.
    ///
    /// See [`crate::config`] for the variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ScoutError)` - If a variable is missing or invalid
    pub fn from_env() -> Result<Self, ScoutError> {
        dotenv::dotenv().ok();

        let config = load_config_from(|name| env::var(name).ok())?;

        info!(
            host = %config.host,
            timeout_secs = config.timeout_secs,
            key_field = %config.key_field,
            debug = config.debug,
            "Loaded OpenSearch configuration"
        );

        Ok(Self { config })
    }

    /// Build an engine for records of type `R`.
    pub fn engine<R>(&self) -> Result<OpenSearchEngine<R>, ScoutError> {
        Ok(OpenSearchEngine::new(self.config.clone())?)
    }

    /// Build a manager with the OpenSearch engine registered as the default driver.
    pub fn manager<R>(&self) -> Result<EngineManager<R>, ScoutError>
    where
        R: Searchable + 'static,
    {
        let mut manager = EngineManager::new();
        manager.register_opensearch(self.config.clone())?;
        Ok(manager)
    }
}
