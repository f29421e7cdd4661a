//! Language model client boundary for the fabio sales agent.
//!
//! This crate provides a minimal, provider-agnostic chat interface: an
//! ordered message list plus an optional set of callable-tool schemas go
//! in, and either assistant text or a list of requested tool calls comes
//! out. The rest of the system treats the model as a black-box text
//! transformer; it is never the source of catalog facts.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{ChatModel, ChatRequest, GroqClient, Message, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env("GROQ_API_KEY")?;
//!     let client = GroqClient::new(config);
//!
//!     let request = ChatRequest::new(vec![
//!         Message::system("Você é um vendedor prestativo."),
//!         Message::user("Oi, tudo bem?"),
//!     ])
//!     .with_temperature(0.7);
//!
//!     let response = client.chat(request).await?;
//!     println!("{}", response.message.content);
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod groq;
pub mod messages;
pub mod tools;

// Re-export commonly used types
pub use chat::{ChatConfig, ChatModel, ChatRequest, ChatResponse, UsageMetadata};
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use groq::GroqClient;
pub use messages::{Message, MessageRole};
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
