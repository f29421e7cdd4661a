//! Fabio, a conversational sales assistant for a smartphone store.
//!
//! The core is a deterministic router: every incoming message is
//! classified by keyword tables and dispatched to exactly one terminal
//! action. Catalog facts are always fetched from the [`catalog`] store
//! before any language-model call; the model only rephrases or
//! synthesizes over pre-fetched text. It is never the source of a
//! technical claim.
//!
//! Module map:
//! - [`normalize`]: colloquial model names to canonical catalog names
//! - [`intent`]: keyword-table intent classification
//! - [`router`]: the dispatch core ([`SalesAgent`])
//! - [`tools`]: catalog queries exposed as LLM tool schemas
//! - [`format`]: query rows to WhatsApp-style text
//! - [`retrieval`]: grounded document retrieval backend
//! - [`session`]: per-user conversation history
//! - [`prompts`] / [`replies`]: system prompts and canned replies

pub mod config;
pub mod error;
pub mod format;
pub mod intent;
pub mod normalize;
pub mod prompts;
pub mod replies;
pub mod response;
pub mod retrieval;
pub mod router;
pub mod session;
pub mod tools;

pub use config::AgentConfig;
pub use error::AgentError;
pub use intent::{Classification, FeatureTopic, Intent, IntentClassifier};
pub use normalize::ModelNormalizer;
pub use response::ResponseAction;
pub use retrieval::{DocumentRetriever, FileSearchRetriever, NoopRetriever};
pub use router::SalesAgent;
pub use session::{MemorySessionStore, SessionStore, Turn, TurnRole};
pub use tools::{CatalogToolbox, ToolCallingAdapter, ToolOutcome};
