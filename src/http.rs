//! HTTP client construction utilities.
//!
//! One place maps declarative HTTP settings onto a `reqwest::Client`, so the
//! builder and any future construction path stay consistent.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::AlchemyError;

/// Declarative settings for the underlying HTTP client.
///
/// Timeouts are deliberately unset by default: the request layer adds none of
/// its own, so whatever is configured here is the only deadline a call has.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Overall request timeout.
    pub timeout: Option<Duration>,
    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
    /// Proxy URL for all requests.
    pub proxy: Option<String>,
    /// User agent string.
    pub user_agent: Option<String>,
    /// Headers attached to every request.
    pub headers: HashMap<String, String>,
}

/// Build an HTTP client from [`HttpConfig`].
///
/// # Returns
/// * `Ok(reqwest::Client)` - Configured HTTP client
/// * `Err(AlchemyError)` - Invalid settings or client build failure
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client, AlchemyError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| AlchemyError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !config.headers.is_empty() {
        let mut headers = reqwest::header::HeaderMap::new();
        for (k, v) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                AlchemyError::ConfigurationError(format!("Invalid header name '{k}': {e}"))
            })?;
            let value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
                AlchemyError::ConfigurationError(format!("Invalid header value for '{k}': {e}"))
            })?;
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| AlchemyError::HttpError(format!("Failed to create HTTP client: {e}")))
}
