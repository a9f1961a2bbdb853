//! Vector store trait.

use async_trait::async_trait;

use crate::document::{SearchResult, StoredRecord};
use crate::error::Result;

/// A storage backend for embedding vectors with similarity search.
///
/// Implementations manage named collections of [`StoredRecord`]s. The
/// system appends during ingestion and reads during queries; there is no
/// deletion lifecycle.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection if it does not already exist.
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Upsert records into a collection. Records must have embeddings set;
    /// an existing record with the same id is replaced.
    async fn upsert(&self, collection: &str, records: &[StoredRecord]) -> Result<()>;

    /// Search for the `top_k` records most similar to the given embedding.
    ///
    /// Returns results ordered by descending similarity score.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
