//! Response formatting: catalog query rows to WhatsApp-style text.
//!
//! A pure function per query shape. The layout here is the product
//! surface customers see, so field order and markers are fixed: spec
//! lookups list labeled technical fields, price, top strengths and up
//! to two photos; rankings use medal markers for the top three.
//! Empty or error-flagged rows always become a friendly "not found"
//! message, never a raw error dump.

use catalog::{is_error_row, Row};

/// Format the result rows of a named catalog query.
pub fn format_query(query_name: &str, rows: &[Row]) -> String {
    if rows.is_empty() || rows.first().map(is_error_row).unwrap_or(false) {
        let message = rows
            .first()
            .and_then(|r| r.get("erro"))
            .and_then(|v| v.as_str())
            .unwrap_or("Dados não encontrados");
        return format!("❌ {}", message);
    }

    match query_name {
        "get_smartphone_details_and_photos" => format_details(rows),
        "get_top_sold_products" => format_top_sold(rows),
        "get_monthly_revenue" => format_monthly_revenue(rows),
        "get_product_sales" => format_product_sales(rows),
        other => {
            // Unreachable for the four catalog queries; kept as a
            // structured dump for diagnostics.
            tracing::warn!(query = other, "formatting unknown query result");
            format!(
                "Resultado de {}: {}",
                other,
                serde_json::to_string_pretty(rows).unwrap_or_default()
            )
        }
    }
}

fn format_details(rows: &[Row]) -> String {
    let p = &rows[0];
    let model = p["modelo"].as_str().unwrap_or("Modelo");
    let manufacturer = p["fabricante"].as_str().unwrap_or("Fabricante");

    let mut out = format!("📱 *{}* ({})\n\n", model, manufacturer);

    let specs = &p["especificacoes_tecnicas"];
    if specs.is_object() {
        out.push_str("*Especificações Técnicas:*\n");
        let labeled = [
            ("processador", "🔧 Processador"),
            ("ram", "💾 RAM"),
            ("armazenamento", "💿 Armazenamento"),
            ("camera_principal", "📸 Câmera"),
            ("bateria", "🔋 Bateria"),
            ("tela", "📺 Tela"),
        ];
        for (key, label) in labeled {
            if let Some(value) = specs.get(key).and_then(|v| v.as_str()) {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        out.push('\n');
    }

    if let Some(price) = p["info_geral"]["preco"].as_f64() {
        out.push_str(&format!("💰 *Preço: {}*\n\n", format_currency(price)));
    }

    if let Some(strengths) = p["pontos_fortes"].as_array() {
        if !strengths.is_empty() {
            out.push_str("*✅ Pontos Fortes:*\n");
            for strength in strengths.iter().take(3) {
                if let Some(s) = strength.as_str() {
                    out.push_str(&format!("  • {}\n", s));
                }
            }
            out.push('\n');
        }
    }

    if let Some(photos) = p["fotos"].as_array() {
        if !photos.is_empty() {
            out.push_str("*📸 Fotos:*\n");
            for photo in photos.iter().take(2) {
                if let Some(url) = photo.as_str() {
                    out.push_str(url);
                    out.push('\n');
                }
            }
        }
    }

    out
}

fn format_top_sold(rows: &[Row]) -> String {
    if rows.len() == 1 {
        let p = &rows[0];
        return format!(
            "🏆 *Produto Mais Vendido:*\n\n📱 {} ({})\n📦 {} unidades\n💰 {}",
            p["modelo"].as_str().unwrap_or(""),
            p["fabricante"].as_str().unwrap_or(""),
            format_units(p["unidades_vendidas"].as_u64().unwrap_or(0)),
            format_currency(p["receita_total"].as_f64().unwrap_or(0.0)),
        );
    }

    let mut lines = vec!["🏆 *Top Produtos Mais Vendidos:*\n".to_string()];
    for (i, p) in rows.iter().take(5).enumerate() {
        let marker = match i {
            0 => "🥇".to_string(),
            1 => "🥈".to_string(),
            2 => "🥉".to_string(),
            n => format!("{}º", n + 1),
        };
        lines.push(format!(
            "{} *{}* ({})",
            marker,
            p["modelo"].as_str().unwrap_or(""),
            p["fabricante"].as_str().unwrap_or(""),
        ));
        lines.push(format!(
            "   📦 {} unidades | 💰 {}\n",
            format_units(p["unidades_vendidas"].as_u64().unwrap_or(0)),
            format_currency(p["receita_total"].as_f64().unwrap_or(0.0)),
        ));
    }
    lines.join("\n")
}

fn format_monthly_revenue(rows: &[Row]) -> String {
    let d = &rows[0];
    format!(
        "💰 *Receita do Período:*\n\n💵 Total: {}\n📦 Unidades: {}",
        format_currency(d["receita_total"].as_f64().unwrap_or(0.0)),
        format_units(d["total_unidades"].as_u64().unwrap_or(0)),
    )
}

fn format_product_sales(rows: &[Row]) -> String {
    let p = &rows[0];
    format!(
        "📊 *Vendas de {}*: {} unidades, gerando {}.",
        p["modelo"].as_str().unwrap_or("Produto"),
        format_units(p["unidades_vendidas"].as_u64().unwrap_or(0)),
        format_currency(p["receita"].as_f64().unwrap_or(0.0)),
    )
}

/// Brazilian currency: "R$ 1.234,56".
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Units with pt-BR thousands separators: 1234 -> "1.234".
pub fn format_units(value: u64) -> String {
    group_thousands(value as i64)
}

fn group_thousands(mut value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(".{:03}", g));
    }
    out
}
