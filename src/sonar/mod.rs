//! Upstream Sonar API client and response formatting.
//!
//! The [`SonarClient`] owns the API credential and the shared HTTP
//! connection pool. It is constructed once at startup, passed into every
//! tool handler, and dropped at shutdown. Each tool call produces exactly
//! one outbound request; there are no retries.

mod client;
mod format;

pub use client::SonarClient;
pub use format::{format_response, FormatOptions, FormatSections};

/// Maximum characters of an upstream error body carried in diagnostics
pub const ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when calling the upstream API
#[derive(Debug, thiserror::Error)]
pub enum SonarError {
    /// The upstream returned a non-2xx status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The request did not complete within its timeout
    #[error("request timed out; try again with a simpler query")]
    Timeout,

    /// DNS, connection, or other transport failure
    #[error("connection error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl SonarError {
    /// Map a reqwest error onto the taxonomy, keeping timeouts
    /// distinguishable from other transport failures.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SonarError::Timeout
        } else {
            let text = err.to_string();
            SonarError::Network(crate::utils::truncate_chars(&text, ERROR_BODY_CHARS).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SonarError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: rate limited");

        assert!(SonarError::Timeout.to_string().contains("timed out"));
    }
}
