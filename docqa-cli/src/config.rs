//! Environment configuration.
//!
//! All configuration comes from environment variables (optionally via a
//! `.env` file), validated once at startup into an explicit [`AppConfig`].
//! Missing variables fail fast with a message naming the variable. Only
//! the variables the selected provider and subcommand actually need are
//! validated.

use std::path::PathBuf;

use anyhow::{Result, bail};

/// Which provider pair serves embeddings and chat.
///
/// `MODEL=openai` selects OpenAI; any other value selects Google, matching
/// the configuration contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Google,
}

impl Provider {
    fn from_model_flag(flag: &str) -> Self {
        if flag == "openai" { Self::OpenAi } else { Self::Google }
    }
}

/// Validated process configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: Provider,
    pub database_url: String,
    pub collection: String,
    pub embedding_model: String,
    /// Chat model name; only present when built via [`AppConfig::for_chat`].
    pub llm_model: Option<String>,
    /// Source PDF; only present when built via [`AppConfig::for_ingest`].
    pub pdf_path: Option<PathBuf>,
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => bail!("Environment variable {name} is not set"),
    }
}

impl AppConfig {
    fn common() -> Result<Self> {
        let provider = Provider::from_model_flag(&required_var("MODEL")?);
        let database_url = required_var("DATABASE_URL")?;
        let collection = required_var("PG_VECTOR_COLLECTION_NAME")?;

        let embedding_model = match provider {
            Provider::OpenAi => required_var("OPENAI_EMBEDDING_MODEL")?,
            Provider::Google => required_var("GOOGLE_EMBEDDING_MODEL")?,
        };

        Ok(Self {
            provider,
            database_url,
            collection,
            embedding_model,
            llm_model: None,
            pdf_path: None,
        })
    }

    /// Configuration for the ingestion entry point: additionally requires
    /// `PDF_PATH`.
    pub fn for_ingest() -> Result<Self> {
        let mut config = Self::common()?;
        config.pdf_path = Some(PathBuf::from(required_var("PDF_PATH")?));
        Ok(config)
    }

    /// Configuration for the chat entry point: additionally requires the
    /// selected provider's LLM model variable.
    pub fn for_chat() -> Result<Self> {
        let mut config = Self::common()?;
        config.llm_model = Some(match config.provider {
            Provider::OpenAi => required_var("OPENAI_LLM_MODEL")?,
            Provider::Google => required_var("GOOGLE_LLM_MODEL")?,
        });
        Ok(config)
    }
}
