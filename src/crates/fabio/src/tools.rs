//! Catalog queries exposed as LLM tool schemas.
//!
//! The [`CatalogToolbox`] declares one schema per [`ProductStore`]
//! query (parameters without a default are required) and executes
//! requested calls against the store. The [`ToolCallingAdapter`] owns
//! the `tool_choice=auto` call: the model may pick a catalog query, and
//! only the query's real result ever becomes an answer. A model that
//! answers in prose instead of calling a tool is treated as a routing
//! failure and handed back to the caller.

use crate::format::format_query;
use catalog::{ProductStore, Row};
use llm::{ChatModel, ChatRequest, Message, ToolChoice, ToolDefinition};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

/// Errors from executing one tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Ferramenta '{0}' não encontrada")]
    UnknownTool(String),

    #[error("Argumentos inválidos: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),
}

/// The four catalog queries, with executable dispatch.
#[derive(Clone)]
pub struct CatalogToolbox {
    store: Arc<dyn ProductStore>,
}

impl CatalogToolbox {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Tool schemas declared to the model.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "get_smartphone_details_and_photos",
                "Busca especificações técnicas completas, preço e fotos de um \
                 smartphone específico do catálogo.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "modelo": {
                        "type": "string",
                        "description": "Nome do modelo, ex: 'Xiaomi Redmi Note 13'",
                    },
                },
                "required": ["modelo"],
            })),
            ToolDefinition::new(
                "get_top_sold_products",
                "Retorna os produtos mais vendidos por unidades. Sem 'limite', \
                 retorna apenas o campeão de vendas.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "limite": {
                        "type": "integer",
                        "description": "Quantos produtos retornar (padrão 1)",
                    },
                },
                "required": [],
            })),
            ToolDefinition::new(
                "get_monthly_revenue",
                "Calcula a receita total e o número de unidades vendidas em um mês.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "mes": {"type": "integer", "description": "Mês (1-12)"},
                    "ano": {"type": "integer", "description": "Ano, ex: 2025"},
                },
                "required": ["mes", "ano"],
            })),
            ToolDefinition::new(
                "get_product_sales",
                "Retorna o total de unidades vendidas e a receita gerada por um \
                 modelo específico.",
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "modelo": {
                        "type": "string",
                        "description": "Nome do modelo, ex: 'Samsung Galaxy A54'",
                    },
                },
                "required": ["modelo"],
            })),
        ]
    }

    /// Execute one tool call by name against the store.
    pub async fn execute(&self, name: &str, args: &JsonValue) -> Result<Vec<Row>, ToolError> {
        match name {
            "get_smartphone_details_and_photos" => {
                let model = require_str(args, "modelo")?;
                Ok(self.store.smartphone_details_and_photos(model).await?)
            }
            "get_top_sold_products" => {
                let limit = args
                    .get("limite")
                    .and_then(|v| v.as_u64())
                    .map(|n| n as usize);
                Ok(self.store.top_sold_products(limit).await?)
            }
            "get_monthly_revenue" => {
                let month = require_int(args, "mes")? as u32;
                let year = require_int(args, "ano")? as i32;
                Ok(self.store.monthly_revenue(month, year).await?)
            }
            "get_product_sales" => {
                let model = require_str(args, "modelo")?;
                Ok(self.store.product_sales(model).await?)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn require_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidArguments(format!("'{}' ausente ou não é texto", key)))
}

fn require_int(args: &JsonValue, key: &str) -> Result<i64, ToolError> {
    args.get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| ToolError::InvalidArguments(format!("'{}' ausente ou não é número", key)))
}

/// What the adapter's model call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// A tool call was executed and formatted (or its error surfaced).
    Answered(String),
    /// The model answered in prose without calling a tool. The caller
    /// must ground the answer some other way; the prose is discarded.
    NoToolCall,
}

/// Runs the `tool_choice=auto` call and executes the requested queries.
#[derive(Clone)]
pub struct ToolCallingAdapter {
    model: Arc<dyn ChatModel>,
    toolbox: CatalogToolbox,
    temperature: f32,
}

impl ToolCallingAdapter {
    pub fn new(model: Arc<dyn ChatModel>, toolbox: CatalogToolbox, temperature: f32) -> Self {
        Self {
            model,
            toolbox,
            temperature,
        }
    }

    /// Send the transcript with tools bound and resolve the outcome.
    ///
    /// Requested calls run in order; the first success is formatted and
    /// returned. Failed calls are not dropped: if nothing succeeds the
    /// last failure is surfaced as the answer text.
    pub async fn run(&self, messages: Vec<Message>) -> llm::Result<ToolOutcome> {
        let request = ChatRequest::new(messages)
            .with_temperature(self.temperature)
            .with_tools(CatalogToolbox::definitions())
            .with_tool_choice(ToolChoice::Auto);

        let response = self.model.chat(request).await?;

        let Some(calls) = response.message.tool_calls.filter(|c| !c.is_empty()) else {
            tracing::debug!("model answered without a tool call");
            return Ok(ToolOutcome::NoToolCall);
        };

        let mut last_error = None;
        for call in calls {
            tracing::info!(tool = %call.name, args = %call.arguments, "executing tool call");

            match self.toolbox.execute(&call.name, &call.arguments).await {
                Ok(rows) => return Ok(ToolOutcome::Answered(format_query(&call.name, &rows))),
                Err(e) => {
                    tracing::warn!(tool = %call.name, error = %e, "tool call failed");
                    last_error = Some(format!("❌ Erro ao executar {}: {}", call.name, e));
                }
            }
        }

        // All requested calls failed
        Ok(ToolOutcome::Answered(last_error.unwrap_or_else(|| {
            "❌ Erro ao executar ferramenta.".to_string()
        })))
    }
}
