//! The [`ProductStore`] query interface.
//!
//! Queries return `Vec<Row>` where a `Row` is a JSON object with
//! Portuguese keys. An empty vector means "nothing found" for lookups;
//! aggregate queries that cannot answer return a single error row
//! (see [`error_row`]) so the caller can relay the message verbatim.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

/// A single query result row.
pub type Row = JsonValue;

/// Build an error row carrying a user-facing message.
pub fn error_row(message: impl Into<String>) -> Row {
    json!({ "erro": message.into() })
}

/// Whether a row is an error row produced by [`error_row`].
pub fn is_error_row(row: &Row) -> bool {
    row.get("erro").is_some()
}

/// The four catalog queries available to the agent.
///
/// These are the only paths by which product facts reach a response.
/// Implementations must not invent data: unknown models yield an empty
/// result, not a guess.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full details and photo URLs for one model.
    ///
    /// `model` must be a canonical catalog name. Returns at most one
    /// row; an unknown model returns an empty vector.
    async fn smartphone_details_and_photos(&self, model: &str) -> Result<Vec<Row>>;

    /// Best-selling models by total units, descending.
    ///
    /// `limit` defaults to 1 (just the champion).
    async fn top_sold_products(&self, limit: Option<usize>) -> Result<Vec<Row>>;

    /// Total revenue and units for one month.
    ///
    /// Returns a single row, or a single error row when the period has
    /// no sales records.
    async fn monthly_revenue(&self, month: u32, year: i32) -> Result<Vec<Row>>;

    /// Lifetime sales totals for one model.
    async fn product_sales(&self, model: &str) -> Result<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_row_roundtrip() {
        let row = error_row("Nenhuma venda registrada para 02/2030");
        assert!(is_error_row(&row));
        assert_eq!(row["erro"], "Nenhuma venda registrada para 02/2030");

        assert!(!is_error_row(&json!({"modelo": "Xiaomi 13T"})));
    }
}
