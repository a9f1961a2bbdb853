//! docqa — ask questions about a PDF from your terminal.
//!
//! Two subcommands: `ingest` loads the configured PDF into the vector
//! store, `chat` starts the interactive question loop. All configuration
//! comes from environment variables (see `config`).

mod config;
mod shell;

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use docqa_model::{ChatModel, GeminiChatModel, OpenAiChatModel};
use docqa_rag::gemini::GeminiEmbeddings;
use docqa_rag::openai::OpenAiEmbeddings;
use docqa_rag::pgvector::PgVectorStore;
use docqa_rag::{CharacterChunker, EmbeddingProvider, PdfLoader, RagPipeline};

use crate::config::{AppConfig, Provider};

/// Sampling temperature for answers: low, to keep them context-grounded.
const ANSWER_TEMPERATURE: f32 = 0.1;

#[derive(Parser)]
#[command(name = "docqa", about = "Retrieval-augmented question answering over a PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the PDF at $PDF_PATH into the vector store
    Ingest,
    /// Start the interactive question loop
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest => ingest().await,
        Commands::Chat => chat().await,
    }
}

fn embedder_for(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    Ok(match config.provider {
        Provider::OpenAi => Arc::new(OpenAiEmbeddings::from_env(&config.embedding_model)?),
        Provider::Google => Arc::new(GeminiEmbeddings::from_env(&config.embedding_model)?),
    })
}

fn chat_model_for(config: &AppConfig) -> Result<Arc<dyn ChatModel>> {
    let Some(model) = config.llm_model.as_deref() else {
        bail!("chat configuration is missing an LLM model");
    };
    Ok(match config.provider {
        Provider::OpenAi => {
            Arc::new(OpenAiChatModel::from_env(model)?.with_temperature(ANSWER_TEMPERATURE))
        }
        Provider::Google => {
            Arc::new(GeminiChatModel::from_env(model)?.with_temperature(ANSWER_TEMPERATURE))
        }
    })
}

async fn ingest() -> Result<()> {
    let config = AppConfig::for_ingest()?;
    let Some(pdf_path) = config.pdf_path.clone() else {
        bail!("ingest configuration is missing a PDF path");
    };

    println!("Conectando ao DB...");
    let store = Arc::new(PgVectorStore::connect(&config.database_url).await?);

    let pipeline = RagPipeline::builder()
        .collection(&config.collection)
        .loader(Arc::new(PdfLoader::new()))
        .chunker(Arc::new(CharacterChunker::default()))
        .embedder(embedder_for(&config)?)
        .store(store)
        .build()?;

    println!("Carregando e processando PDF...");
    let count = pipeline.ingest(&pdf_path).await?;

    println!("Ingestão finalizada! {count} registros salvos.");
    Ok(())
}

async fn chat() -> Result<()> {
    let config = AppConfig::for_chat()?;

    println!("Conectando ao DB...");
    let store = Arc::new(PgVectorStore::connect(&config.database_url).await?);

    let pipeline = RagPipeline::builder()
        .collection(&config.collection)
        .loader(Arc::new(PdfLoader::new()))
        .chunker(Arc::new(CharacterChunker::default()))
        .embedder(embedder_for(&config)?)
        .store(store)
        .chat_model(chat_model_for(&config)?)
        .build()?;

    shell::run(&pipeline).await
}
