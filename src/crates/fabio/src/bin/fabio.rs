//! Command-line entry point: one question in, one answer out.
//!
//! ```text
//! GROQ_API_KEY=... fabio "qual o preço do redmi note 13?"
//! ```

use anyhow::Context;
use catalog::MemoryCatalog;
use clap::Parser;
use fabio::{AgentConfig, DocumentRetriever, FileSearchRetriever, NoopRetriever, SalesAgent};
use llm::{GroqClient, RemoteLlmConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fabio", about = "Assistente de vendas de smartphones", version)]
struct Cli {
    /// The customer message to answer.
    question: String,

    /// Groq API key.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: String,

    /// Google API key for document retrieval (optional).
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Gemini file-search store name (optional, pairs with the key).
    #[arg(long, env = "FILE_SEARCH_STORE")]
    file_search_store: Option<String>,

    /// Override the chat model name.
    #[arg(long)]
    model: Option<String>,

    /// User id for session continuity.
    #[arg(long, default_value = "cli")]
    user: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut llm_config = RemoteLlmConfig::new(
        cli.groq_api_key,
        llm::config::GROQ_BASE_URL,
        llm::config::DEFAULT_MODEL,
    );
    if let Some(model) = cli.model {
        llm_config = llm_config.with_model(model);
    }
    let model = Arc::new(GroqClient::new(llm_config));

    let retriever: Arc<dyn DocumentRetriever> =
        match (cli.google_api_key, cli.file_search_store) {
            (Some(key), Some(store)) => Arc::new(FileSearchRetriever::new(key, store)),
            _ => {
                tracing::info!("no file-search store configured, retrieval disabled");
                Arc::new(NoopRetriever)
            }
        };

    let catalog = MemoryCatalog::seeded();
    let model_names = catalog.model_names();

    let agent = SalesAgent::new(
        model,
        Arc::new(catalog),
        retriever,
        model_names,
        AgentConfig::default(),
    );

    let action = agent.process_message(&cli.user, &cli.question).await;

    let rendered = serde_json::to_string_pretty(&action).context("serializing response")?;
    println!("{}", rendered);

    Ok(())
}
