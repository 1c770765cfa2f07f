//! OpenSearch client implementation.
//!
//! This module provides the HTTP client for the Aliyun OpenSearch v3 API. It
//! implements the document, search and suggest client traits; everything
//! else the adapter does is built on top of those three calls.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::SearchError;
use crate::interfaces::{DocumentClient, SearchClient, SuggestClient};
use crate::opensearch::params::SearchParams;
use crate::opensearch::signer::{self, RequestSigner, NONCE_HEADER};
use scout_opensearch_shared::SearchResults;

const API_PREFIX: &str = "/v3/openapi/apps";
const STATUS_OK: &str = "OK";

/// Status envelope returned by the document and suggest endpoints.
#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<VendorMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct VendorMessage {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestBody {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Default, Deserialize)]
struct Suggestion {
    #[serde(default)]
    suggestion: String,
}

/// HTTP client for the OpenSearch API.
///
/// # Example
///
/// ```ignore
/// use scout_opensearch_repository::{OpenSearchClient, OpenSearchConfig};
/// let host = "http://opensearch-cn-hangzhou.aliyuncs.com";
/// let config = OpenSearchConfig::new("key", "secret", host);
/// let client = OpenSearchClient::new(&config)?;
///
/// client.push(r#"[{"cmd":"ADD","fields":{"id":1}}]"#, "shop", "products").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    http: reqwest::Client,
    host: String,
    signer: RequestSigner,
    debug: bool,
}

impl OpenSearchClient {
    /// Create a new client for the endpoint and credentials in `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the config is incomplete or the host is not a URL
    pub fn new(config: &OpenSearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let parsed =
            Url::parse(&config.host).map_err(|e| SearchError::configuration(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(SearchError::configuration(format!(
                "Host is not a base URL: {}",
                config.host
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::configuration(e.to_string()))?;

        info!(
            host = %config.host,
            timeout_secs = config.timeout_secs,
            debug = config.debug,
            "Created OpenSearch client"
        );

        Ok(Self {
            http,
            host: config.host.trim_end_matches('/').to_string(),
            signer: RequestSigner::new(&config.access_key, &config.access_secret),
            debug: config.debug,
        })
    }

    /// Sign and send a request, returning the response body.
    ///
    /// Transport failures map to `ConnectionError`, non-2xx statuses to
    /// `VendorError`.
    async fn call(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<String>,
    ) -> Result<String, SearchError> {
        let now = Utc::now();
        let date = signer::format_date(now);
        let nonce = signer::nonce(now);
        let signed = self.signer.sign(
            method.as_str(),
            path,
            params,
            body.as_deref(),
            &date,
            &nonce,
        )?;

        let mut url = format!("{}{}", self.host, signer::canonical_path(path));
        if !signed.query.is_empty() {
            url.push('?');
            url.push_str(&signed.query);
        }

        if self.debug {
            info!(method = %method, url = %url, body = ?body, "OpenSearch request");
        }

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", signed.content_type)
            .header("Date", &signed.date)
            .header(NONCE_HEADER, &signed.nonce)
            .header("Authorization", &signed.authorization);
        if !signed.content_md5.is_empty() {
            request = request.header("Content-MD5", &signed.content_md5);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if self.debug {
            info!(status = %status, body = %text, "OpenSearch response");
        }

        if !status.is_success() {
            error!(status = %status, body = %text, url = %url, "OpenSearch request failed");
            return Err(SearchError::vendor(format!(
                "Request failed with status {}: {}",
                status, text
            )));
        }

        Ok(text)
    }

    /// Check the `status` field of a document push response.
    fn check_status(body: &str) -> Result<(), SearchError> {
        let parsed: StatusBody = serde_json::from_str(body).map_err(|e| {
            SearchError::vendor(format!("Unreadable response ({}): {}", e, body))
        })?;

        match parsed.status.as_deref() {
            Some(STATUS_OK) => Ok(()),
            status => {
                let messages = parsed
                    .errors
                    .iter()
                    .map(|e| format!("{} {}", e.code, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                error!(status = ?status, errors = %messages, "OpenSearch reported failure");
                Err(SearchError::vendor(format!(
                    "Status {}: {}",
                    status.unwrap_or("missing"),
                    messages
                )))
            }
        }
    }
}

#[async_trait]
impl DocumentClient for OpenSearchClient {
    /// Push a batch of document commands.
    ///
    /// A response whose `status` is not `OK` is reported as a `VendorError`
    /// carrying the vendor's error codes and messages.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn push(
        &self,
        payload: &str,
        app_name: &str,
        table_name: &str,
    ) -> Result<(), SearchError> {
        let path = format!("{}/{}/{}/actions/bulk", API_PREFIX, app_name, table_name);
        let body = self
            .call(Method::POST, &path, &[], Some(payload.to_string()))
            .await?;

        Self::check_status(&body)?;
        debug!(app_name = %app_name, table_name = %table_name, "Documents pushed");
        Ok(())
    }
}

#[async_trait]
impl SearchClient for OpenSearchClient {
    /// Execute a search and return the body untouched.
    #[instrument(skip(self, params), fields(app_name = %params.app_name))]
    async fn execute(&self, params: &SearchParams) -> Result<SearchResults, SearchError> {
        let path = format!("{}/{}/search", API_PREFIX, params.app_name);
        let query = vec![("query".to_string(), params.to_query_string())];

        let body = self.call(Method::GET, &path, &query, None).await?;
        debug!(bytes = body.len(), "Search executed");
        Ok(SearchResults::Raw(body))
    }
}

#[async_trait]
impl SuggestClient for OpenSearchClient {
    /// Fetch completions. Malformed bodies yield no suggestions.
    #[instrument(skip(self))]
    async fn suggest(
        &self,
        app_name: &str,
        suggest_name: &str,
        prefix: &str,
        hits: usize,
    ) -> Result<Vec<String>, SearchError> {
        let path = format!("{}/{}/suggest/{}/search", API_PREFIX, app_name, suggest_name);
        let query = vec![
            ("hit".to_string(), hits.to_string()),
            ("query".to_string(), prefix.to_string()),
        ];

        let body = self.call(Method::GET, &path, &query, None).await?;
        let parsed: SuggestBody = serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Unreadable suggest response, treating as empty");
            SuggestBody::default()
        });

        Ok(parsed
            .suggestions
            .into_iter()
            .map(|s| s.suggestion)
            .filter(|s| !s.is_empty())
            .collect())
    }
}
