//! Error type for the dispatch core.
//!
//! Dispatch paths bubble failures up with `?`; the router recovers all
//! of them at its boundary into the fixed apology reply, so none of
//! these ever reach a user as raw text.

use thiserror::Error;

/// Any failure inside a dispatch path.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] llm::LlmError),

    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),

    #[error(transparent)]
    Retrieval(#[from] crate::retrieval::RetrievalError),

    #[error(transparent)]
    Tool(#[from] crate::tools::ToolError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
