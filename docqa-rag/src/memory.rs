//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. It backs the pipeline tests and is usable for
//! small local runs without PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{SearchResult, StoredRecord};
use crate::error::{RagError, Result};
use crate::store::VectorStore;

/// An in-memory [`VectorStore`] ranking by cosine similarity.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, HashMap<String, StoredRecord>>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection, or `None` if it does not exist.
    pub async fn len(&self, collection: &str) -> Option<usize> {
        self.collections.read().await.get(collection).map(HashMap::len)
    }

    /// Fetch a record by id, if present.
    pub async fn get(&self, collection: &str, id: &str) -> Option<StoredRecord> {
        self.collections.read().await.get(collection)?.get(id).cloned()
    }
}

/// Cosine similarity of two vectors; 0.0 when either has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[StoredRecord]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| RagError::VectorStore {
            backend: "memory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;
        for record in records {
            store.insert(record.id.clone(), record.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| RagError::VectorStore {
            backend: "memory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;

        let mut scored: Vec<SearchResult> = store
            .values()
            .map(|record| SearchResult {
                score: cosine_similarity(&record.embedding, embedding),
                record: record.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Metadata;

    fn record(id: &str, embedding: Vec<f32>) -> StoredRecord {
        StoredRecord {
            id: id.to_string(),
            content: format!("content of {id}"),
            metadata: Metadata::new(),
            embedding,
        }
    }

    #[tokio::test]
    async fn search_ranks_by_cosine_similarity() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection("docs", 2).await.unwrap();
        store
            .upsert(
                "docs",
                &[
                    record("DOC-0", vec![1.0, 0.0]),
                    record("DOC-1", vec![0.0, 1.0]),
                    record("DOC-2", vec![0.7, 0.7]),
                ],
            )
            .await
            .unwrap();

        let results = store.search("docs", &[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].record.id, "DOC-0");
        assert_eq!(results[1].record.id, "DOC-2");
    }

    #[tokio::test]
    async fn upsert_replaces_existing_id() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection("docs", 2).await.unwrap();
        store.upsert("docs", &[record("DOC-0", vec![1.0, 0.0])]).await.unwrap();

        let mut replacement = record("DOC-0", vec![0.0, 1.0]);
        replacement.content = "replaced".to_string();
        store.upsert("docs", &[replacement]).await.unwrap();

        assert_eq!(store.len("docs").await, Some(1));
        assert_eq!(store.get("docs", "DOC-0").await.unwrap().content, "replaced");
    }

    #[tokio::test]
    async fn search_in_missing_collection_is_an_error() {
        let store = InMemoryVectorStore::new();
        let err = store.search("missing", &[1.0], 5).await.unwrap_err();
        assert!(matches!(err, RagError::VectorStore { .. }));
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
