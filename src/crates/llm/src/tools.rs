//! Tool calling abstractions for function-calling models.
//!
//! A [`ToolDefinition`] describes a callable function (name, free-text
//! description, JSON Schema parameters). The model answers either with
//! plain text or with [`ToolCall`]s naming a tool and JSON arguments;
//! the executing side runs the named query and answers from its result.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Definition of a tool/function that the model can call.
///
/// The `parameters` field is a JSON Schema object: `type: "object"`,
/// `properties` mapping parameter names to schemas, and a `required`
/// list. Parameters with defaults on the backing query are omitted from
/// `required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool within the bound tool list.
    pub name: String,

    /// Description the model uses to decide when to call the tool.
    pub description: String,

    /// JSON Schema describing the tool's parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonValue>,
}

impl ToolDefinition {
    /// Create a new tool definition with name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Add a JSON Schema for the tool's parameters.
    pub fn with_parameters(mut self, parameters: JsonValue) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// A request from the model to invoke a specific tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-generated id, used to correlate the tool result.
    pub id: String,

    /// Name of the tool to call; matches a `ToolDefinition::name`.
    pub name: String,

    /// JSON arguments for the call. Not validated here; the executing
    /// side decodes and rejects malformed arguments per call.
    pub arguments: JsonValue,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// How the model may use the bound tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// The model decides whether to call a tool (`tool_choice=auto`).
    #[default]
    Auto,
    /// The model must not call tools.
    None,
    /// The model must call at least one tool.
    Required,
}

impl ToolChoice {
    /// The wire value for OpenAI-compatible providers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolChoice::Auto => "auto",
            ToolChoice::None => "none",
            ToolChoice::Required => "required",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("get_monthly_revenue", "Receita total de um mês")
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "mes": {"type": "integer"},
                    "ano": {"type": "integer"},
                },
                "required": ["mes", "ano"],
            }));

        assert_eq!(tool.name, "get_monthly_revenue");
        assert!(tool.parameters.is_some());
    }

    #[test]
    fn test_tool_choice_wire_values() {
        assert_eq!(ToolChoice::Auto.as_str(), "auto");
        assert_eq!(ToolChoice::None.as_str(), "none");
        assert_eq!(ToolChoice::Required.as_str(), "required");
        assert_eq!(ToolChoice::default(), ToolChoice::Auto);
    }
}
