//! Error types for catalog queries.

use thiserror::Error;

/// Errors that can occur while querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store rejected or failed the query.
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be built or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
