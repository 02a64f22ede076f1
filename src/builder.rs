//! Client configuration and construction.
//!
//! The builder is the configuration layer: API key, gateway URL, HTTP
//! settings, endpoint table. It does no validation of analysis parameters;
//! that stays with the operations themselves.

use std::time::Duration;

use secrecy::SecretString;

use crate::client::{AlchemyClient, DEFAULT_BASE_URL};
use crate::endpoints::EndpointTable;
use crate::error::AlchemyError;
use crate::http::{HttpConfig, build_http_client};

/// Environment variable consulted when no API key is set explicitly.
pub const API_KEY_ENV: &str = "ALCHEMYAPI_API_KEY";

/// Fluent configuration for [`AlchemyClient`].
///
/// # Example
/// ```rust,no_run
/// use alchemyapi::AlchemyClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), alchemyapi::AlchemyError> {
/// let client = AlchemyClient::builder()
///     .api_key("your-api-key")
///     .with_timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlchemyBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    /// Custom HTTP client; when set, the `http_config` settings are ignored.
    http_client: Option<reqwest::Client>,
    http_config: HttpConfig,
    endpoints: Option<EndpointTable>,
}

impl AlchemyBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    ///
    /// When unset, [`build`](Self::build) falls back to the
    /// `ALCHEMYAPI_API_KEY` environment variable.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Override the gateway base URL.
    ///
    /// Defaults to the public gateway; a trailing `/` is trimmed so path
    /// concatenation stays predictable.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use an existing `reqwest` client instead of building one.
    ///
    /// The HTTP settings on this builder (timeouts, proxy, headers, user
    /// agent) are ignored when a custom client is supplied.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Set the connection establishment timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(user_agent.into());
        self
    }

    /// Route all requests through a proxy.
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.http_config.proxy = Some(proxy_url.into());
        self
    }

    /// Attach a header to every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_config.headers.insert(name.into(), value.into());
        self
    }

    /// Substitute the endpoint table.
    ///
    /// Defaults to [`EndpointTable::builtin`].
    pub fn with_endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Build the client.
    ///
    /// Fails with [`AlchemyError::ConfigurationError`] when no API key is
    /// available, the HTTP settings are invalid, or the endpoint table
    /// cannot be loaded.
    pub fn build(self) -> Result<AlchemyClient, AlchemyError> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var(API_KEY_ENV).map(SecretString::from).map_err(|_| {
                AlchemyError::ConfigurationError(format!(
                    "API key is required: pass it to the builder or set {API_KEY_ENV}"
                ))
            })?,
        };

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.http_config)?,
        };

        let endpoints = match self.endpoints {
            Some(table) => table,
            None => EndpointTable::builtin()?,
        };

        Ok(AlchemyClient::from_parts(
            api_key,
            base_url,
            http_client,
            endpoints,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_explicit_key_uses_default_gateway() {
        let client = AlchemyBuilder::new().api_key("k").build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(client.endpoints().supports("sentiment", "text"));
    }

    #[test]
    fn test_build_trims_trailing_slash() {
        let client = AlchemyBuilder::new()
            .api_key("k")
            .base_url("http://gateway.example/calls/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://gateway.example/calls");
    }

    #[test]
    fn test_build_accepts_custom_http_client_and_table() {
        let table = EndpointTable::from_json(r#"{"ping": {"text": "/text/Ping"}}"#).unwrap();
        let client = AlchemyBuilder::new()
            .api_key("k")
            .with_http_client(reqwest::Client::new())
            .with_endpoints(table)
            .build()
            .unwrap();
        assert!(client.endpoints().supports("ping", "text"));
        assert!(!client.endpoints().supports("sentiment", "text"));
    }

    #[test]
    fn test_build_rejects_invalid_http_settings() {
        let err = AlchemyBuilder::new()
            .api_key("k")
            .with_proxy("not a proxy url")
            .build()
            .unwrap_err();
        assert!(matches!(err, AlchemyError::ConfigurationError(_)));
    }
}
