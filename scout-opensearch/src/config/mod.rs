//! Configuration loading for the OpenSearch driver.
//!
//! # Environment Variables
//!
//! - `OPENSEARCH_ACCESS_KEY`: access key id (required)
//! - `OPENSEARCH_ACCESS_SECRET`: access key secret (required)
//! - `OPENSEARCH_HOST`: API endpoint (default: http://opensearch-cn-hangzhou.aliyuncs.com)
//! - `OPENSEARCH_DEBUG`: log request and response bodies (default: false)
//! - `OPENSEARCH_TIMEOUT`: request timeout in seconds (default: 10)
//! - `OPENSEARCH_KEY_FIELD`: field holding the record id in hits (default: id)

mod dependencies;

pub use dependencies::Dependencies;

use scout_opensearch_repository::config::{DEFAULT_HOST, DEFAULT_KEY_FIELD, DEFAULT_TIMEOUT_SECS};
use scout_opensearch_repository::OpenSearchConfig;

use crate::ScoutError;

pub const ACCESS_KEY_VAR: &str = "OPENSEARCH_ACCESS_KEY";
pub const ACCESS_SECRET_VAR: &str = "OPENSEARCH_ACCESS_SECRET";
pub const HOST_VAR: &str = "OPENSEARCH_HOST";
pub const DEBUG_VAR: &str = "OPENSEARCH_DEBUG";
pub const TIMEOUT_VAR: &str = "OPENSEARCH_TIMEOUT";
pub const KEY_FIELD_VAR: &str = "OPENSEARCH_KEY_FIELD";

/// Build an `OpenSearchConfig` from a variable lookup.
///
/// Unset or empty variables take their defaults. Credentials have no default.
pub fn load_config_from<F>(lookup: F) -> Result<OpenSearchConfig, ScoutError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let access_key = var(ACCESS_KEY_VAR)
        .ok_or_else(|| ScoutError::config(format!("{} is not set", ACCESS_KEY_VAR)))?;
    let access_secret = var(ACCESS_SECRET_VAR)
        .ok_or_else(|| ScoutError::config(format!("{} is not set", ACCESS_SECRET_VAR)))?;
    let host = var(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());

    let debug = match var(DEBUG_VAR) {
        Some(value) => parse_bool(&value).ok_or_else(|| {
            ScoutError::config(format!("{} is not a boolean: {}", DEBUG_VAR, value))
        })?,
        None => false,
    };

    let timeout_secs = match var(TIMEOUT_VAR) {
        Some(value) => value.trim().parse::<u64>().map_err(|e| {
            ScoutError::config(format!("{} is not a number of seconds: {}", TIMEOUT_VAR, e))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    let key_field = var(KEY_FIELD_VAR).unwrap_or_else(|| DEFAULT_KEY_FIELD.to_string());

    let config = OpenSearchConfig::new(access_key, access_secret, host)
        .with_debug(debug)
        .with_timeout_secs(timeout_secs)
        .with_key_field(key_field);
    config.validate()?;

    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
