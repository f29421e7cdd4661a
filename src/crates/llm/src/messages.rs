//! Conversation message types.
//!
//! A [`Message`] is one turn of a chat transcript: a role, text content,
//! and, for assistant turns, the tool calls the model requested. The
//! wire format mirrors the OpenAI-compatible chat schema that Groq and
//! most hosted providers speak.

use crate::tools::ToolCall;
use serde::{Deserialize, Serialize};

/// The speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Fixed system instruction (always the first turn of a session).
    System,
    /// End-user message.
    User,
    /// Model-generated message.
    Assistant,
    /// Result of an executed tool call, keyed by `tool_call_id`.
    Tool,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: MessageRole,

    /// Text content. May be empty for assistant turns that only
    /// request tool calls.
    pub content: String,

    /// Optional participant name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// For `Tool` messages: the id of the call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// For `Assistant` messages: tool invocations requested by the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Create a tool-result message for the given call id.
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        let mut msg = Self::new(MessageRole::Tool, content);
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Attach a participant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach requested tool calls (assistant messages only).
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    /// Whether this message carries at least one tool call request.
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls
            .as_ref()
            .map(|calls| !calls.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_roles() {
        assert_eq!(Message::system("s").role, MessageRole::System);
        assert_eq!(Message::user("u").role, MessageRole::User);
        assert_eq!(Message::assistant("a").role, MessageRole::Assistant);

        let tool = Message::tool("{}", "call_1");
        assert_eq!(tool.role, MessageRole::Tool);
        assert_eq!(tool.tool_call_id, Some("call_1".to_string()));
    }

    #[test]
    fn test_has_tool_calls() {
        let plain = Message::assistant("hello");
        assert!(!plain.has_tool_calls());

        let with_calls = Message::assistant("").with_tool_calls(vec![ToolCall::new(
            "call_1",
            "get_product_sales",
            json!({"modelo": "Xiaomi 13T"}),
        )]);
        assert!(with_calls.has_tool_calls());

        let empty_calls = Message::assistant("").with_tool_calls(vec![]);
        assert!(!empty_calls.has_tool_calls());
    }

    #[test]
    fn test_role_serialization() {
        let msg = Message::user("oi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "user");
        // Optional fields are omitted, not null
        assert!(value.get("tool_calls").is_none());
    }
}
