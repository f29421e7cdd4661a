//! Configuration for remote chat model providers.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI-compatible endpoint for Groq.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used by the sales agent.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for a remote, OpenAI-compatible chat provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API (e.g. Groq: `https://api.groq.com/openai/v1`).
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl RemoteLlmConfig {
    /// Create a new remote LLM configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            timeout: default_timeout(),
        }
    }

    /// Create a Groq configuration with the default model, reading the
    /// API key from the given environment variable.
    pub fn from_env(env_var: &str) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .map_err(|_| LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var)))?;

        Ok(Self::new(api_key, GROQ_BASE_URL, DEFAULT_MODEL))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
