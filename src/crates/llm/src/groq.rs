//! Groq client implementation.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint, so
//! this client also works against any provider speaking that dialect.
//! Tool definitions are sent as `{"type": "function", "function": ...}`
//! entries and requested tool calls are parsed back into [`ToolCall`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{ChatModel, ChatRequest, GroqClient, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env("GROQ_API_KEY")?;
//! let client = GroqClient::new(config);
//!
//! let response = client.chat(ChatRequest::new(vec![Message::user("Oi!")])).await?;
//! ```

use crate::chat::{ChatModel, ChatRequest, ChatResponse, UsageMetadata};
use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::messages::{Message, MessageRole};
use crate::tools::{ToolCall, ToolDefinition};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Groq (OpenAI-compatible) chat API client.
#[derive(Clone)]
pub struct GroqClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl GroqClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Convert a [`Message`] to the wire message format.
    fn convert_message(&self, msg: &Message) -> WireMessage {
        WireMessage {
            role: match msg.role {
                MessageRole::System => "system".to_string(),
                MessageRole::User => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
                MessageRole::Tool => "tool".to_string(),
            },
            content: Some(msg.content.clone()),
            name: msg.name.clone(),
            tool_call_id: msg.tool_call_id.clone(),
            tool_calls: msg.tool_calls.as_ref().map(|calls| {
                calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        kind: "function".to_string(),
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.to_string(),
                        },
                    })
                    .collect()
            }),
        }
    }

    /// Convert a tool definition to the wire tool format.
    fn convert_tool(&self, tool: &ToolDefinition) -> WireTool {
        WireTool {
            kind: "function".to_string(),
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool
                    .parameters
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}})),
            },
        }
    }

    /// Convert the provider response to a [`ChatResponse`].
    fn convert_response(&self, wire: WireResponse) -> Result<ChatResponse> {
        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;

        let tool_calls = choice.message.tool_calls.map(|calls| {
            calls
                .into_iter()
                .map(|call| {
                    // Arguments arrive JSON-encoded in a string. A payload
                    // that fails to decode is kept as a raw string so the
                    // executing side can reject it per call instead of
                    // failing the whole turn.
                    let arguments = serde_json::from_str(&call.function.arguments)
                        .unwrap_or(JsonValue::String(call.function.arguments));
                    ToolCall::new(call.id, call.function.name, arguments)
                })
                .collect::<Vec<_>>()
        });

        let mut message = Message::assistant(choice.message.content.unwrap_or_default());
        if let Some(calls) = tool_calls {
            message = message.with_tool_calls(calls);
        }

        let usage = wire
            .usage
            .map(|u| UsageMetadata::new(u.prompt_tokens, u.completion_tokens));

        Ok(ChatResponse { message, usage })
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let messages: Vec<WireMessage> = request
            .messages
            .iter()
            .map(|m| self.convert_message(m))
            .collect();

        let tools: Vec<WireTool> = request
            .config
            .tools
            .iter()
            .map(|t| self.convert_tool(t))
            .collect();

        let req_body = WireRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.config.temperature,
            max_tokens: request.config.max_tokens,
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some(request.config.tool_choice.as_str())
            },
            tools: if tools.is_empty() { None } else { Some(tools) },
            stream: false,
        };

        tracing::debug!(model = %self.config.model, tools = req_body.tools.as_ref().map(|t| t.len()).unwrap_or(0), "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&req_body)
            .send()
            .await
            .map_err(LlmError::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationError(error_text),
                429 => LlmError::RateLimitExceeded(error_text),
                _ => LlmError::ProviderError(format!("Groq API error {}: {}", status, error_text)),
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        self.convert_response(wire)
    }

    fn clone_box(&self) -> Box<dyn ChatModel> {
        Box::new(self.clone())
    }
}

// OpenAI-compatible wire types

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: JsonValue,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MODEL, GROQ_BASE_URL};
    use serde_json::json;

    fn test_client() -> GroqClient {
        GroqClient::new(RemoteLlmConfig::new("test-key", GROQ_BASE_URL, DEFAULT_MODEL))
    }

    #[test]
    fn test_message_conversion_all_roles() {
        let client = test_client();

        let sys = client.convert_message(&Message::system("Você é Fabio"));
        assert_eq!(sys.role, "system");

        let user = client.convert_message(&Message::user("Oi").with_name("cliente"));
        assert_eq!(user.role, "user");
        assert_eq!(user.content, Some("Oi".to_string()));
        assert_eq!(user.name, Some("cliente".to_string()));

        let tool = client.convert_message(&Message::tool("{}", "call_1"));
        assert_eq!(tool.role, "tool");
        assert_eq!(tool.tool_call_id, Some("call_1".to_string()));
    }

    #[test]
    fn test_tool_conversion_defaults_empty_schema() {
        let client = test_client();
        let wire = client.convert_tool(&ToolDefinition::new("get_top_sold_products", "Top vendas"));

        assert_eq!(wire.kind, "function");
        assert_eq!(wire.function.parameters["type"], "object");
    }

    #[test]
    fn test_response_conversion_text() {
        let client = test_client();
        let wire = WireResponse {
            choices: vec![WireChoice {
                message: WireMessage {
                    role: "assistant".to_string(),
                    content: Some("Olá! Como posso ajudar?".to_string()),
                    name: None,
                    tool_call_id: None,
                    tool_calls: None,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(WireUsage {
                prompt_tokens: 12,
                completion_tokens: 8,
            }),
        };

        let response = client.convert_response(wire).unwrap();
        assert_eq!(response.message.content, "Olá! Como posso ajudar?");
        assert!(!response.message.has_tool_calls());
        assert_eq!(response.usage.unwrap().total_tokens, 20);
    }

    #[test]
    fn test_response_conversion_tool_calls() {
        let client = test_client();
        let wire = WireResponse {
            choices: vec![WireChoice {
                message: WireMessage {
                    role: "assistant".to_string(),
                    content: None,
                    name: None,
                    tool_call_id: None,
                    tool_calls: Some(vec![WireToolCall {
                        id: "call_1".to_string(),
                        kind: "function".to_string(),
                        function: WireFunctionCall {
                            name: "get_product_sales".to_string(),
                            arguments: r#"{"modelo": "Xiaomi 13T"}"#.to_string(),
                        },
                    }]),
                },
                finish_reason: Some("tool_calls".to_string()),
            }],
            usage: None,
        };

        let response = client.convert_response(wire).unwrap();
        assert!(response.message.has_tool_calls());

        let calls = response.message.tool_calls.unwrap();
        assert_eq!(calls[0].name, "get_product_sales");
        assert_eq!(calls[0].arguments, json!({"modelo": "Xiaomi 13T"}));
    }

    #[test]
    fn test_response_conversion_malformed_arguments_kept_raw() {
        let client = test_client();
        let wire = WireResponse {
            choices: vec![WireChoice {
                message: WireMessage {
                    role: "assistant".to_string(),
                    content: None,
                    name: None,
                    tool_call_id: None,
                    tool_calls: Some(vec![WireToolCall {
                        id: "call_1".to_string(),
                        kind: "function".to_string(),
                        function: WireFunctionCall {
                            name: "get_product_sales".to_string(),
                            arguments: "not json".to_string(),
                        },
                    }]),
                },
                finish_reason: None,
            }],
            usage: None,
        };

        let response = client.convert_response(wire).unwrap();
        let calls = response.message.tool_calls.unwrap();
        assert_eq!(calls[0].arguments, JsonValue::String("not json".to_string()));
    }

    #[test]
    fn test_response_without_choices_is_error() {
        let client = test_client();
        let wire = WireResponse {
            choices: vec![],
            usage: None,
        };

        assert!(matches!(
            client.convert_response(wire),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
