//! Request signing for the OpenSearch v3 API.
//!
//! Every request carries an `Authorization: OPENSEARCH <key>:<signature>`
//! header, where the signature is the base64 HMAC-SHA1 of:
//!
//! ```text
//! VERB\nContent-MD5\nContent-Type\nDate\n<x-opensearch-* headers><resource>
//! ```

use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use rand::Rng;
use sha1::Sha1;

use crate::errors::SearchError;

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json";

/// Header carrying the per-request nonce.
pub const NONCE_HEADER: &str = "X-Opensearch-Nonce";

/// Headers and query string produced by signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub content_md5: String,
    pub content_type: &'static str,
    pub date: String,
    pub nonce: String,
    pub authorization: String,
    /// Encoded query string, also used in the request URL.
    pub query: String,
}

/// Signs requests with an access key pair.
#[derive(Clone)]
pub struct RequestSigner {
    access_key: String,
    access_secret: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Sign a request.
    ///
    /// `body` is only hashed for non-GET requests, matching what the API
    /// verifies.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        params: &[(String, String)],
        body: Option<&str>,
        date: &str,
        nonce: &str,
    ) -> Result<SignedRequest, SearchError> {
        let method = method.to_uppercase();
        let content_md5 = match body {
            Some(body) if method != "GET" && !body.is_empty() => content_md5(body),
            _ => String::new(),
        };
        let query = canonical_query(params);

        let mut resource = canonical_path(path);
        if !query.is_empty() {
            resource.push('?');
            resource.push_str(&query);
        }

        let string_to_sign = format!(
            "{}\n{}\n{}\n{}\n{}{}",
            method,
            content_md5,
            CONTENT_TYPE,
            date,
            canonical_headers(&[(NONCE_HEADER, nonce)]),
            resource
        );

        let signature = self.signature(&string_to_sign)?;

        Ok(SignedRequest {
            content_md5,
            content_type: CONTENT_TYPE,
            date: date.to_string(),
            nonce: nonce.to_string(),
            authorization: format!("OPENSEARCH {}:{}", self.access_key, signature),
            query,
        })
    }

    fn signature(&self, string_to_sign: &str) -> Result<String, SearchError> {
        let mut mac = Hmac::<Sha1>::new_from_slice(self.access_secret.as_bytes())
            .map_err(|e| SearchError::configuration(format!("Invalid access secret: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Hex MD5 of the request body.
pub fn content_md5(body: &str) -> String {
    hex::encode(Md5::digest(body.as_bytes()))
}

/// Date header value, e.g. `2024-05-01T08:30:00Z`.
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Millisecond timestamp followed by five random digits.
pub fn nonce(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(10000..100000);
    format!("{}{}", now.timestamp_millis(), suffix)
}

/// RFC 3986 encode the path, keeping `/` separators.
pub fn canonical_path(path: &str) -> String {
    urlencoding::encode(path).replace("%2F", "/")
}

/// RFC 3986 encoded `k=v` pairs sorted by key, empty values dropped.
pub fn canonical_query(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> =
        params.iter().filter(|(_, value)| !value.is_empty()).collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lowercased, sorted `x-opensearch-*` headers, one `key:value\n` per line.
fn canonical_headers(headers: &[(&str, &str)]) -> String {
    let mut lines: Vec<(String, &str)> = headers
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| (name.to_lowercase(), value.trim()))
        .filter(|(name, _)| name.starts_with("x-opensearch-"))
        .collect();
    lines.sort();

    lines
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect()
}
