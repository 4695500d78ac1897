//! Configuration (env vars, with `.env` support).

use crate::error::{HearsayError, Result};

/// Configuration for the remote service.
///
/// Resolution order: explicit setters win over values read from the
/// environment at construction time.
#[derive(Debug, Clone, Default)]
pub struct Config {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (`OPENAI_API_KEY`, `OPENAI_BASE_URL`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Resolve the API key, erroring when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key().ok_or_else(|| {
            HearsayError::Authentication(
                "Missing API key: set OPENAI_API_KEY or use Config::with_api_key".to_string(),
            )
        })
    }
}
