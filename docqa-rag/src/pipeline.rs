//! The ingestion-and-answering pipeline.
//!
//! [`RagPipeline`] composes a [`DocumentLoader`], a [`Chunker`], an
//! [`EmbeddingProvider`], a [`VectorStore`], and a
//! [`ChatModel`](docqa_model::ChatModel) into the two operations this
//! system performs: [`ingest`](RagPipeline::ingest) and
//! [`answer`](RagPipeline::answer).

use std::path::Path;
use std::sync::Arc;

use docqa_model::ChatModel;
use tracing::{error, info};

use crate::chunking::Chunker;
use crate::document::{StoredRecord, normalize_metadata};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::loader::DocumentLoader;
use crate::prompt;
use crate::store::VectorStore;

/// Number of nearest records retrieved per question.
pub const DEFAULT_TOP_K: usize = 10;

/// The pipeline orchestrator. Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    collection: String,
    top_k: usize,
    loader: Arc<dyn DocumentLoader>,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chat_model: Option<Arc<dyn ChatModel>>,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("collection", &self.collection)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// The collection this pipeline reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Ingest one source file: load → split → normalize → embed → store.
    ///
    /// Chunks receive sequential ids `DOC-0 … DOC-(n-1)` in source order,
    /// so re-ingesting the same file overwrites the previous run's records.
    /// Returns the number of records stored.
    ///
    /// # Errors
    ///
    /// - [`RagError::Load`] if the source cannot be read or parsed
    /// - [`RagError::EmptyDocument`] if splitting yields zero chunks;
    ///   nothing is sent to the embedding provider or the store
    /// - [`RagError::Embedding`] / [`RagError::VectorStore`] propagated
    ///   from the providers, with no partial-failure recovery
    pub async fn ingest(&self, source: &Path) -> Result<usize> {
        let documents = self.loader.load(source)?;

        let chunks: Vec<_> =
            documents.iter().flat_map(|doc| self.chunker.split(doc)).collect();
        if chunks.is_empty() {
            error!(source = %source.display(), "splitting produced no chunks");
            return Err(RagError::EmptyDocument {
                source_path: source.display().to_string(),
            });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Pipeline(format!(
                "provider returned {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let records: Vec<StoredRecord> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (chunk, embedding))| StoredRecord {
                id: format!("DOC-{index}"),
                content: chunk.content,
                metadata: normalize_metadata(chunk.metadata),
                embedding,
            })
            .collect();

        self.store.ensure_collection(&self.collection, self.embedder.dimensions()).await?;
        self.store.upsert(&self.collection, &records).await?;

        info!(
            source = %source.display(),
            collection = %self.collection,
            record_count = records.len(),
            "ingestion finished"
        );
        Ok(records.len())
    }

    /// Answer a question from stored context only.
    ///
    /// Embeds the question, retrieves the `top_k` nearest records, joins
    /// their contents with newlines in retrieval order, renders the fixed
    /// prompt, and asks the chat model.
    ///
    /// # Errors
    ///
    /// - [`RagError::InvalidInput`] if the question is empty or blank,
    ///   before any provider call
    /// - provider errors propagated unchanged
    pub async fn answer(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(RagError::InvalidInput("a question is required".to_string()));
        }
        let chat_model = self.chat_model.as_ref().ok_or_else(|| {
            RagError::Config("chat_model is required to answer questions".to_string())
        })?;

        let query_embedding = self.embedder.embed(question).await?;
        let results =
            self.store.search(&self.collection, &query_embedding, self.top_k).await?;

        let context = prompt::build_context(&results);
        let rendered = prompt::render(&context, question);

        let answer = chat_model.generate(&rendered).await?;

        info!(
            collection = %self.collection,
            retrieved = results.len(),
            answer_len = answer.len(),
            "answered question"
        );
        Ok(answer)
    }
}

/// Builder for [`RagPipeline`].
///
/// Every seam except `top_k` and `chat_model` is required; a pipeline
/// built without a chat model can ingest but refuses to answer.
#[derive(Default)]
pub struct RagPipelineBuilder {
    collection: Option<String>,
    top_k: Option<usize>,
    loader: Option<Arc<dyn DocumentLoader>>,
    chunker: Option<Arc<dyn Chunker>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    chat_model: Option<Arc<dyn ChatModel>>,
}

impl RagPipelineBuilder {
    /// Set the vector store collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Set how many records each question retrieves (default 10).
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the document loader.
    pub fn loader(mut self, loader: Arc<dyn DocumentLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Set the chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the chat model used to answer questions.
    pub fn chat_model(mut self, chat_model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(chat_model);
        self
    }

    /// Build the pipeline, validating that every required seam is set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] naming the missing seam.
    pub fn build(self) -> Result<RagPipeline> {
        let collection = self
            .collection
            .filter(|c| !c.is_empty())
            .ok_or_else(|| RagError::Config("collection is required".to_string()))?;
        let loader =
            self.loader.ok_or_else(|| RagError::Config("loader is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Config("store is required".to_string()))?;

        Ok(RagPipeline {
            collection,
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
            loader,
            chunker,
            embedder,
            store,
            chat_model: self.chat_model,
        })
    }
}
