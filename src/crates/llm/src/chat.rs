//! Chat request/response types and the [`ChatModel`] trait.
//!
//! The contract is deliberately narrow: given an ordered message list
//! plus an optional tool-schema list and a tool-choice mode, return
//! either assistant text or a set of requested tool invocations. No
//! streaming, no provider-specific knobs beyond temperature and token
//! limits. Callers that need grounding enforce it *around* this trait,
//! never inside it.

use crate::error::Result;
use crate::messages::Message;
use crate::tools::{ToolChoice, ToolDefinition};
use async_trait::async_trait;

/// A request to a chat model containing messages and configuration.
///
/// # Example
///
/// ```rust,ignore
/// let request = ChatRequest::new(vec![
///     Message::system("Você é um vendedor prestativo."),
///     Message::user("Qual o mais vendido?"),
/// ])
/// .with_temperature(0.1)
/// .with_max_tokens(1024)
/// .with_tools(tool_definitions);
/// ```
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Generation configuration.
    pub config: ChatConfig,
}

impl ChatRequest {
    /// Create a new chat request with the given messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            config: ChatConfig::default(),
        }
    }

    /// Set the sampling temperature. Lower is more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// Bind tools/functions that the model can call.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.config.tools = tools;
        self
    }

    /// Set the tool-choice mode (only meaningful when tools are bound).
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.config.tool_choice = tool_choice;
        self
    }
}

/// Configuration parameters for chat generation.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    /// Sampling temperature (0.0-2.0, provider-dependent).
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    pub max_tokens: Option<usize>,

    /// Tool/function definitions for function-calling models.
    pub tools: Vec<ToolDefinition>,

    /// How the model may use the bound tools.
    pub tool_choice: ToolChoice,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    pub input_tokens: usize,
    /// Tokens in the completion.
    pub output_tokens: usize,
    /// Total tokens billed.
    pub total_tokens: usize,
}

impl UsageMetadata {
    /// Create usage metadata from input/output counts.
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// A complete response from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant message: text, tool calls, or both.
    pub message: Message,

    /// Token usage, when the provider reports it.
    pub usage: Option<UsageMetadata>,
}

/// Core trait for chat-based language models.
///
/// Implementations handle converting messages to their provider's wire
/// format, making the API call, and parsing the response. They must be
/// `Send + Sync`; share across tasks with `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete chat response from messages.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError`] for network failures, authentication
    /// errors, rate limiting, or unparseable provider responses.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Clone this model into a boxed trait object.
    fn clone_box(&self) -> Box<dyn ChatModel>;
}

impl Clone for Box<dyn ChatModel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageRole;
    use std::sync::Arc;

    #[derive(Clone)]
    struct MockModel {
        response_text: String,
    }

    #[async_trait]
    impl ChatModel for MockModel {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            Ok(ChatResponse {
                message: Message::assistant(self.response_text.clone()),
                usage: Some(UsageMetadata::new(10, 5)),
            })
        }

        fn clone_box(&self) -> Box<dyn ChatModel> {
            Box::new(self.clone())
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let model: Arc<dyn ChatModel> = Arc::new(MockModel {
            response_text: "Olá!".to_string(),
        });

        let request = ChatRequest::new(vec![Message::user("Oi")]);
        let response = model.chat(request).await.unwrap();

        assert_eq!(response.message.role, MessageRole::Assistant);
        assert_eq!(response.message.content, "Olá!");
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::new(vec![Message::user("test")])
            .with_temperature(0.1)
            .with_max_tokens(1024)
            .with_tool_choice(ToolChoice::Auto);

        assert_eq!(request.config.temperature, Some(0.1));
        assert_eq!(request.config.max_tokens, Some(1024));
        assert_eq!(request.config.tool_choice, ToolChoice::Auto);
        assert!(request.config.tools.is_empty());
    }
}
