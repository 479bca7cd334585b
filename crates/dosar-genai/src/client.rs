//! HTTP client handle for the Generative Language API.

use std::time::Duration;

use crate::error::GenAiError;

/// Public API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hard request-level timeout. Expiry surfaces as
/// [`GenAiError::Timeout`] rather than blocking indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Authenticated handle shared by generation and file operations.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GenAiClient {
    /// Build a client for the given API key.
    ///
    /// The key is trimmed; an empty key is a configuration error and is
    /// rejected here, before any request is attempted.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenAiError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GenAiError::Config("empty API key".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenAiError::Config(e.to_string()))?;

        Ok(GenAiClient {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API host (used by tests pointing at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}
