//! In-memory catalog seeded with the store's lineup.

use crate::error::Result;
use crate::product::{Product, SalesRecord};
use crate::store::{error_row, ProductStore, Row};
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;

/// In-process [`ProductStore`] backed by seeded vectors.
///
/// Lookups by model name are case-insensitive exact matches; callers
/// normalize aliases before querying.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<Product>,
    sales: Vec<SalesRecord>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new(products: Vec<Product>, sales: Vec<SalesRecord>) -> Self {
        Self { products, sales }
    }

    /// The catalog with the store's current smartphone lineup and the
    /// 2025 sales figures.
    pub fn seeded() -> Self {
        Self::new(seed_products(), seed_sales())
    }

    /// Canonical model names in the catalog.
    pub fn model_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.model.clone()).collect()
    }

    fn find_product(&self, model: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.model.eq_ignore_ascii_case(model))
    }

    fn totals_for(&self, model: &str) -> Option<(u32, f64)> {
        let mut found = false;
        let mut units = 0u32;
        let mut revenue = 0f64;

        for record in &self.sales {
            if record.model.eq_ignore_ascii_case(model) {
                found = true;
                units += record.units;
                revenue += record.revenue;
            }
        }

        found.then_some((units, revenue))
    }
}

#[async_trait]
impl ProductStore for MemoryCatalog {
    async fn smartphone_details_and_photos(&self, model: &str) -> Result<Vec<Row>> {
        Ok(self
            .find_product(model)
            .map(|p| vec![p.to_row()])
            .unwrap_or_default())
    }

    async fn top_sold_products(&self, limit: Option<usize>) -> Result<Vec<Row>> {
        let limit = limit.unwrap_or(1);

        let mut totals: BTreeMap<&str, (u32, f64)> = BTreeMap::new();
        for record in &self.sales {
            let entry = totals.entry(record.model.as_str()).or_default();
            entry.0 += record.units;
            entry.1 += record.revenue;
        }

        let mut ranked: Vec<(&str, u32, f64)> = totals
            .into_iter()
            .map(|(model, (units, revenue))| (model, units, revenue))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);

        Ok(ranked
            .into_iter()
            .map(|(model, units, revenue)| {
                let manufacturer = self
                    .find_product(model)
                    .map(|p| p.manufacturer.clone())
                    .unwrap_or_default();
                json!({
                    "modelo": model,
                    "fabricante": manufacturer,
                    "unidades_vendidas": units,
                    "receita_total": revenue,
                })
            })
            .collect())
    }

    async fn monthly_revenue(&self, month: u32, year: i32) -> Result<Vec<Row>> {
        let mut units = 0u32;
        let mut revenue = 0f64;
        let mut found = false;

        for record in &self.sales {
            if record.month == month && record.year == year {
                found = true;
                units += record.units;
                revenue += record.revenue;
            }
        }

        if !found {
            return Ok(vec![error_row(format!(
                "Nenhuma venda registrada para {:02}/{}",
                month, year
            ))]);
        }

        Ok(vec![json!({
            "receita_total": revenue,
            "total_unidades": units,
        })])
    }

    async fn product_sales(&self, model: &str) -> Result<Vec<Row>> {
        let Some(product) = self.find_product(model) else {
            return Ok(Vec::new());
        };

        Ok(self
            .totals_for(&product.model)
            .map(|(units, revenue)| {
                vec![json!({
                    "modelo": product.model,
                    "unidades_vendidas": units,
                    "receita": revenue,
                })]
            })
            .unwrap_or_default())
    }
}

fn specs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            model: "iPhone 15 Pro Max".to_string(),
            manufacturer: "Apple".to_string(),
            specs: specs(&[
                ("processador", "Apple A17 Pro"),
                ("ram", "8GB"),
                ("armazenamento", "256GB"),
                ("camera_principal", "48MP"),
                ("bateria", "4422mAh"),
                ("tela", "6,7\" OLED 120Hz"),
            ]),
            price: 10499.0,
            category: "Flagship".to_string(),
            segment: "Premium".to_string(),
            strengths: strings(&[
                "Melhor desempenho do mercado",
                "Câmeras com qualidade profissional",
                "Construção em titânio",
                "Ecossistema Apple integrado",
            ]),
            photos: strings(&[
                "https://cdn.loja.example/fotos/iphone-15-pro-max-1.jpg",
                "https://cdn.loja.example/fotos/iphone-15-pro-max-2.jpg",
            ]),
        },
        Product {
            model: "Motorola Moto G54".to_string(),
            manufacturer: "Motorola".to_string(),
            specs: specs(&[
                ("processador", "MediaTek Dimensity 7020"),
                ("ram", "8GB"),
                ("armazenamento", "256GB"),
                ("camera_principal", "50MP"),
                ("bateria", "5000mAh"),
                ("tela", "6,5\" IPS 120Hz"),
            ]),
            price: 1299.0,
            category: "Intermediário".to_string(),
            segment: "Custo-benefício".to_string(),
            strengths: strings(&[
                "Ótimo preço",
                "Android limpo",
                "Bateria para o dia todo",
            ]),
            photos: strings(&["https://cdn.loja.example/fotos/moto-g54-1.jpg"]),
        },
        Product {
            model: "Samsung Galaxy A54".to_string(),
            manufacturer: "Samsung".to_string(),
            specs: specs(&[
                ("processador", "Exynos 1380"),
                ("ram", "8GB"),
                ("armazenamento", "128GB"),
                ("camera_principal", "50MP com OIS"),
                ("bateria", "5000mAh"),
                ("tela", "6,4\" Super AMOLED 120Hz"),
            ]),
            price: 1999.0,
            category: "Intermediário".to_string(),
            segment: "Custo-benefício".to_string(),
            strengths: strings(&[
                "Câmera com estabilização óptica",
                "Tela Super AMOLED",
                "Resistência à água IP67",
            ]),
            photos: strings(&[
                "https://cdn.loja.example/fotos/galaxy-a54-1.jpg",
                "https://cdn.loja.example/fotos/galaxy-a54-2.jpg",
            ]),
        },
        Product {
            model: "Samsung Galaxy S24 Ultra".to_string(),
            manufacturer: "Samsung".to_string(),
            specs: specs(&[
                ("processador", "Snapdragon 8 Gen 3"),
                ("ram", "12GB"),
                ("armazenamento", "512GB"),
                ("camera_principal", "200MP"),
                ("bateria", "5000mAh"),
                ("tela", "6,8\" Dynamic AMOLED 120Hz"),
            ]),
            price: 8999.0,
            category: "Flagship".to_string(),
            segment: "Premium".to_string(),
            strengths: strings(&[
                "Câmera de 200MP com zoom de 100x",
                "S Pen integrada",
                "Galaxy AI",
            ]),
            photos: strings(&[
                "https://cdn.loja.example/fotos/galaxy-s24-ultra-1.jpg",
                "https://cdn.loja.example/fotos/galaxy-s24-ultra-2.jpg",
            ]),
        },
        Product {
            model: "Xiaomi 13T".to_string(),
            manufacturer: "Xiaomi".to_string(),
            specs: specs(&[
                ("processador", "MediaTek Dimensity 8200-Ultra"),
                ("ram", "12GB"),
                ("armazenamento", "256GB"),
                ("camera_principal", "50MP Leica"),
                ("bateria", "5000mAh"),
                ("tela", "6,67\" AMOLED 144Hz"),
            ]),
            price: 3799.0,
            category: "Flagship".to_string(),
            segment: "Premium acessível".to_string(),
            strengths: strings(&[
                "Câmeras assinadas pela Leica",
                "Tela de 144Hz",
                "Carregamento rápido de 67W",
            ]),
            photos: strings(&["https://cdn.loja.example/fotos/xiaomi-13t-1.jpg"]),
        },
        Product {
            model: "Xiaomi Redmi Note 13".to_string(),
            manufacturer: "Xiaomi".to_string(),
            specs: specs(&[
                ("processador", "Snapdragon 685"),
                ("ram", "8GB"),
                ("armazenamento", "256GB"),
                ("camera_principal", "108MP"),
                ("bateria", "5000mAh"),
                ("tela", "6,67\" AMOLED 120Hz"),
            ]),
            price: 1499.0,
            category: "Intermediário".to_string(),
            segment: "Custo-benefício".to_string(),
            strengths: strings(&[
                "Câmera de 108MP na faixa de entrada",
                "Tela AMOLED de 120Hz",
                "Melhor custo-benefício da loja",
            ]),
            photos: strings(&[
                "https://cdn.loja.example/fotos/redmi-note-13-1.jpg",
                "https://cdn.loja.example/fotos/redmi-note-13-2.jpg",
            ]),
        },
    ]
}

fn seed_sales() -> Vec<SalesRecord> {
    fn record(model: &str, units: u32, revenue: f64, month: u32) -> SalesRecord {
        SalesRecord {
            model: model.to_string(),
            units,
            revenue,
            month,
            year: 2025,
        }
    }

    vec![
        // Janeiro
        record("Xiaomi Redmi Note 13", 412, 617_588.0, 1),
        record("Motorola Moto G54", 305, 396_195.0, 1),
        record("Samsung Galaxy A54", 244, 487_756.0, 1),
        record("Xiaomi 13T", 118, 448_282.0, 1),
        record("Samsung Galaxy S24 Ultra", 64, 575_936.0, 1),
        record("iPhone 15 Pro Max", 41, 430_459.0, 1),
        // Fevereiro
        record("Xiaomi Redmi Note 13", 389, 583_111.0, 2),
        record("Motorola Moto G54", 298, 387_102.0, 2),
        record("Samsung Galaxy A54", 231, 461_769.0, 2),
        record("Xiaomi 13T", 102, 387_498.0, 2),
        record("Samsung Galaxy S24 Ultra", 58, 521_942.0, 2),
        record("iPhone 15 Pro Max", 37, 388_463.0, 2),
        // Março
        record("Xiaomi Redmi Note 13", 447, 670_053.0, 3),
        record("Motorola Moto G54", 322, 418_278.0, 3),
        record("Samsung Galaxy A54", 259, 517_741.0, 3),
        record("Xiaomi 13T", 131, 497_669.0, 3),
        record("Samsung Galaxy S24 Ultra", 71, 638_929.0, 3),
        record("iPhone 15 Pro Max", 45, 472_455.0, 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::is_error_row;

    #[tokio::test]
    async fn test_details_known_model() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog
            .smartphone_details_and_photos("Xiaomi Redmi Note 13")
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["modelo"], "Xiaomi Redmi Note 13");
        assert_eq!(rows[0]["info_geral"]["preco"], 1499.0);
        assert!(rows[0]["fotos"].as_array().is_some());
    }

    #[tokio::test]
    async fn test_details_lookup_is_case_insensitive() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog
            .smartphone_details_and_photos("xiaomi redmi note 13")
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_details_unknown_model_is_empty() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog
            .smartphone_details_and_photos("Nokia 3310")
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_top_sold_defaults_to_champion() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.top_sold_products(None).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["modelo"], "Xiaomi Redmi Note 13");
        assert_eq!(rows[0]["unidades_vendidas"], 412 + 389 + 447);
    }

    #[tokio::test]
    async fn test_top_sold_ranking_descends() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.top_sold_products(Some(3)).await.unwrap();

        assert_eq!(rows.len(), 3);
        let units: Vec<u64> = rows
            .iter()
            .map(|r| r["unidades_vendidas"].as_u64().unwrap())
            .collect();
        assert!(units[0] >= units[1] && units[1] >= units[2]);
    }

    #[tokio::test]
    async fn test_monthly_revenue_aggregates() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.monthly_revenue(1, 2025).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0]["total_unidades"],
            412 + 305 + 244 + 118 + 64 + 41
        );
    }

    #[tokio::test]
    async fn test_monthly_revenue_missing_period_is_error_row() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.monthly_revenue(12, 2030).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert!(is_error_row(&rows[0]));
    }

    #[tokio::test]
    async fn test_product_sales_totals() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.product_sales("Xiaomi 13T").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["unidades_vendidas"], 118 + 102 + 131);
    }

    #[tokio::test]
    async fn test_product_sales_unknown_model_is_empty() {
        let catalog = MemoryCatalog::seeded();
        let rows = catalog.product_sales("Nokia 3310").await.unwrap();

        assert!(rows.is_empty());
    }
}
