//! HTTP client utilities.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::HttpConfig;
use crate::sources::ProviderError;

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a new HTTP client from the `[http]` configuration section
    pub fn from_config(config: &HttpConfig) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| default_user_agent().to_string());

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client: Arc::new(client),
        }
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// A non-success status becomes [`ProviderError::Transport`]; connection
    /// failures become [`ProviderError::Network`] and a body that does not
    /// decode into `T` becomes [`ProviderError::Parse`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        provider: &str,
    ) -> Result<T, ProviderError> {
        tracing::debug!(provider, url = %url, "sending search request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to reach {}: {}", provider, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Transport {
                provider: provider.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to read {} response: {}", provider, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("Failed to parse {} response: {}", provider, e)))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// User agent sent when none is configured
pub fn default_user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}
