//! Product catalog and sales data for the Fabio sales agent.
//!
//! Everything the agent states about a product comes out of this crate.
//! The [`ProductStore`] trait exposes the four catalog queries the agent
//! can run; [`MemoryCatalog`] is the in-process implementation seeded
//! with the store's smartphone lineup. Query results are JSON rows with
//! Portuguese keys, the shape the response formatter expects.

pub mod error;
pub mod memory;
pub mod product;
pub mod store;

pub use error::{CatalogError, Result};
pub use memory::MemoryCatalog;
pub use product::{Product, SalesRecord};
pub use store::{error_row, is_error_row, ProductStore, Row};
