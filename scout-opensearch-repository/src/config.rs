//! Configuration types for the OpenSearch client and engine.

use crate::errors::SearchError;

/// Default API endpoint.
pub const DEFAULT_HOST: &str = "http://opensearch-cn-hangzhou.aliyuncs.com";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default field holding the record identifier in search hits.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Default number of hits for a non-paginated search.
pub const DEFAULT_HITS: usize = 20;

/// Configuration for the OpenSearch client and engine.
///
/// Built once at construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// Access key id used to sign requests.
    pub access_key: String,
    /// Access key secret used to sign requests.
    pub access_secret: String,
    /// API endpoint, including the scheme.
    pub host: String,
    /// Log every request and response body.
    pub debug: bool,
    /// Request timeout handed to the HTTP client, in seconds.
    pub timeout_secs: u64,
    /// Field holding the record identifier in search hits.
    pub key_field: String,
    /// Number of hits for a non-paginated search without a limit.
    pub default_hits: usize,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            access_secret: String::new(),
            host: DEFAULT_HOST.to_string(),
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            key_field: DEFAULT_KEY_FIELD.to_string(),
            default_hits: DEFAULT_HITS,
        }
    }
}

impl OpenSearchConfig {
    /// Create a config with the given credentials and endpoint.
    pub fn new(
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
            host: host.into(),
            ..Default::default()
        }
    }

    /// Enable or disable request/response logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the field holding the record identifier.
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Check that the config can be used to build a client.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.access_key.is_empty() {
            return Err(SearchError::configuration("access key is required"));
        }
        if self.access_secret.is_empty() {
            return Err(SearchError::configuration("access secret is required"));
        }
        if self.host.is_empty() {
            return Err(SearchError::configuration("host is required"));
        }
        if self.key_field.is_empty() {
            return Err(SearchError::configuration("key field must not be empty"));
        }
        Ok(())
    }
}
