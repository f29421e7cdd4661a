//! The agent's output contract.

use serde::{Deserialize, Serialize};

/// What the agent wants the caller to deliver to the user.
///
/// Every dispatch path terminates in exactly one of these. Callers
/// (CLI, webhook, tests) decide how to render each variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResponseAction {
    /// Plain text reply.
    Text {
        /// Message body.
        content: String,
    },

    /// Photo references with a caption.
    Photos {
        /// Photo URLs, in send order.
        photos: Vec<String>,
        /// Caption accompanying the photos.
        caption: String,
    },
}

impl ResponseAction {
    /// Build a text action.
    pub fn text(content: impl Into<String>) -> Self {
        ResponseAction::Text {
            content: content.into(),
        }
    }

    /// Build a photos action.
    pub fn photos(photos: Vec<String>, caption: impl Into<String>) -> Self {
        ResponseAction::Photos {
            photos,
            caption: caption.into(),
        }
    }

    /// The textual part of the action (content or caption).
    pub fn text_content(&self) -> &str {
        match self {
            ResponseAction::Text { content } => content,
            ResponseAction::Photos { caption, .. } => caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let action = ResponseAction::text("Olá!");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["kind"], "text");
        assert_eq!(value["content"], "Olá!");

        let action = ResponseAction::photos(vec!["https://x.jpg".to_string()], "Fotos 📸");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["kind"], "photos");
        assert_eq!(value["photos"][0], "https://x.jpg");
    }
}
