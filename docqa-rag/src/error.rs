//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur while ingesting documents or answering questions.
#[derive(Debug, Error)]
pub enum RagError {
    /// A component was configured inconsistently.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source file could not be read or parsed.
    #[error("Failed to load '{source_path}': {message}")]
    Load {
        /// Path of the file that failed to load.
        source_path: String,
        /// A description of the failure.
        message: String,
    },

    /// Splitting the source produced zero chunks. Fatal for the ingestion
    /// run; nothing is sent to the embedding provider or the store.
    #[error("Splitting '{source_path}' produced no chunks")]
    EmptyDocument {
        /// Path of the offending source file.
        source_path: String,
    },

    /// The caller passed input the pipeline refuses to process.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStore {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error propagated from the chat model provider.
    #[error(transparent)]
    Model(#[from] docqa_model::ModelError),

    /// An inconsistency detected while orchestrating the pipeline.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
