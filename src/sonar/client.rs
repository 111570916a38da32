//! HTTP client for the Sonar chat-completions endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::{Config, ConfigError};
use crate::models::{ChatRequest, ChatResponse};
use crate::sonar::{SonarError, ERROR_BODY_CHARS};
use crate::utils::truncate_chars;

/// Client for the Sonar API.
///
/// Owns the bearer credential and a shared connection pool. Safe to share
/// across concurrent tool calls via `Arc`; every call issues exactly one
/// POST with its own timeout.
#[derive(Debug, Clone)]
pub struct SonarClient {
    client: Arc<Client>,
    api_key: String,
    api_url: String,
}

impl SonarClient {
    /// Build a client from configuration.
    ///
    /// Fails when the credential is absent; the server must not serve tool
    /// calls without one.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            api_url: config.api_url.clone(),
        })
    }

    /// The configured endpoint URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send one request to the upstream with the given timeout.
    ///
    /// Non-2xx statuses become [`SonarError::Api`] with a truncated body;
    /// timeouts become [`SonarError::Timeout`]; nothing is retried.
    pub async fn send(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatResponse, SonarError> {
        tracing::debug!(
            model = %request.model,
            academic = request.is_academic(),
            "sending Sonar API request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(SonarError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(SonarError::from_reqwest)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Sonar API returned an error");
            return Err(SonarError::Api {
                status: status.as_u16(),
                body: truncate_chars(&body, ERROR_BODY_CHARS).to_string(),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|_| SonarError::Parse(truncate_chars(&body, ERROR_BODY_CHARS).to_string()))?;

        tracing::debug!("Sonar API response received");
        Ok(parsed)
    }
}
