//! Catalog entry types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;

/// A smartphone in the catalog.
///
/// Specs are an ordered map of Portuguese keys (`processador`, `ram`,
/// `armazenamento`, `camera_principal`, `bateria`, `tela`) so rows
/// serialize in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Full model name, e.g. "Xiaomi Redmi Note 13".
    pub model: String,

    /// Manufacturer, e.g. "Xiaomi".
    pub manufacturer: String,

    /// Technical specifications keyed in Portuguese.
    pub specs: BTreeMap<String, String>,

    /// Retail price in BRL.
    pub price: f64,

    /// Market category, e.g. "Flagship" or "Intermediário".
    pub category: String,

    /// Target segment, e.g. "Premium" or "Custo-benefício".
    pub segment: String,

    /// Selling points, strongest first.
    pub strengths: Vec<String>,

    /// Photo URLs.
    pub photos: Vec<String>,
}

impl Product {
    /// Render this product as a details row.
    ///
    /// The keys mirror the sales-data schema the formatter and the
    /// comparison prompt consume: `modelo`, `fabricante`,
    /// `especificacoes_tecnicas`, `info_geral.preco`, `categoria`,
    /// `segmento`, `pontos_fortes`, `fotos`.
    pub fn to_row(&self) -> JsonValue {
        json!({
            "modelo": self.model,
            "fabricante": self.manufacturer,
            "especificacoes_tecnicas": self.specs,
            "info_geral": { "preco": self.price },
            "categoria": self.category,
            "segmento": self.segment,
            "pontos_fortes": self.strengths,
            "fotos": self.photos,
        })
    }
}

/// One month of sales for one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Model name, matching a [`Product::model`].
    pub model: String,

    /// Units sold in the month.
    pub units: u32,

    /// Revenue in BRL for the month.
    pub revenue: f64,

    /// Month (1-12).
    pub month: u32,

    /// Year.
    pub year: i32,
}
