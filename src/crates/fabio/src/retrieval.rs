//! Document retrieval backend.
//!
//! Generic and feature-flag questions are answered from a document
//! store when possible. The [`FileSearchRetriever`] queries Gemini's
//! file-search tool over a pre-uploaded store; a failed or empty
//! retrieval yields an empty string, which the router treats as "no
//! grounded answer" and falls back on.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Base URL for the Gemini API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for file-search generation.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Errors from the retrieval backend.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Answers free-text questions from a document store.
///
/// An `Ok` empty string means "no grounded answer available". Backends
/// swallow provider errors into that signal so one flaky retrieval
/// never takes down a turn.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn query(&self, text: &str) -> Result<String>;
}

/// Gemini file-search retriever over the REST `generateContent` API.
#[derive(Clone)]
pub struct FileSearchRetriever {
    api_key: String,
    store_name: String,
    base_url: String,
    client: reqwest::Client,
}

impl FileSearchRetriever {
    /// Create a retriever over an existing file-search store.
    pub fn new(api_key: impl Into<String>, store_name: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.into(),
            store_name: store_name.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            client,
        }
    }

    /// Override the base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn extract_text(data: &JsonValue) -> String {
        data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: String,
    contents: &'a str,
    tools: Vec<JsonValue>,
}

#[async_trait]
impl DocumentRetriever for FileSearchRetriever {
    async fn query(&self, text: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, self.api_key
        );

        let body = GenerateRequest {
            model: format!("models/{}", GEMINI_MODEL),
            contents: text,
            tools: vec![serde_json::json!({
                "file_search": {
                    "file_search_store_names": [self.store_name],
                }
            })],
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "file search request failed");
            return Ok(String::new());
        }

        let data: JsonValue = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "file search response was not valid JSON");
                return Ok(String::new());
            }
        };

        Ok(Self::extract_text(&data))
    }
}

/// Retriever that never finds anything. Used when no document store is
/// configured, so every retrieval path degrades to its fallback.
#[derive(Debug, Clone, Default)]
pub struct NoopRetriever;

#[async_trait]
impl DocumentRetriever for NoopRetriever {
    async fn query(&self, _text: &str) -> Result<String> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_from_candidates() {
        let data = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "O Galaxy A54 tem NFC."}],
                }
            }]
        });
        assert_eq!(
            FileSearchRetriever::extract_text(&data),
            "O Galaxy A54 tem NFC."
        );
    }

    #[test]
    fn test_extract_text_missing_shape_is_empty() {
        assert_eq!(FileSearchRetriever::extract_text(&json!({})), "");
        assert_eq!(
            FileSearchRetriever::extract_text(&json!({"candidates": []})),
            ""
        );
    }

    #[tokio::test]
    async fn test_noop_retriever_is_always_empty() {
        let retriever = NoopRetriever;
        assert_eq!(retriever.query("qualquer coisa").await.unwrap(), "");
    }
}
