//! # docqa-rag
//!
//! PDF ingestion and retrieval-augmented answering for docqa.
//!
//! The crate wires five seams into one [`RagPipeline`]:
//!
//! - [`DocumentLoader`] — reads a source file into per-page [`Document`]s
//!   ([`PdfLoader`] is the shipped implementation)
//! - [`Chunker`] — splits page text into overlapping windows
//!   ([`CharacterChunker`])
//! - [`EmbeddingProvider`] — maps text to vectors
//!   ([`openai::OpenAiEmbeddings`], [`gemini::GeminiEmbeddings`])
//! - [`VectorStore`] — persists and searches records
//!   ([`pgvector::PgVectorStore`], [`memory::InMemoryVectorStore`])
//! - [`docqa_model::ChatModel`] — answers from the assembled prompt
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_rag::{CharacterChunker, PdfLoader, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .collection("documents")
//!     .loader(Arc::new(PdfLoader::new()))
//!     .chunker(Arc::new(CharacterChunker::default()))
//!     .embedder(embedder)
//!     .store(store)
//!     .chat_model(chat)
//!     .build()?;
//!
//! pipeline.ingest(Path::new("document.pdf")).await?;
//! let answer = pipeline.answer("What does the document say?").await?;
//! ```

pub mod chunking;
pub mod document;
pub mod embedding;
mod error;
pub mod gemini;
pub mod loader;
pub mod memory;
pub mod openai;
pub mod pgvector;
mod pipeline;
pub mod prompt;
pub mod store;

pub use chunking::{CharacterChunker, Chunker};
pub use document::{Document, Metadata, SearchResult, StoredRecord, normalize_metadata};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use loader::{DocumentLoader, PdfLoader};
pub use pipeline::{DEFAULT_TOP_K, RagPipeline, RagPipelineBuilder};
pub use store::VectorStore;
