//! Data types for documents, stored records, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scalar metadata attached to a document or record.
///
/// Values are JSON scalars (strings, numbers, booleans). `Null` and the
/// empty string are legal on input but are stripped by
/// [`normalize_metadata`] before anything reaches the vector store.
pub type Metadata = HashMap<String, Value>;

/// One unit of source text: a page when produced by a loader, a chunk
/// after splitting. Ephemeral; persisted only as a [`StoredRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text content.
    pub content: String,
    /// Key-value metadata (source path, page number, chunk index).
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), metadata: Metadata::new() }
    }

    /// Create a document with the given metadata.
    pub fn with_metadata(content: impl Into<String>, metadata: Metadata) -> Self {
        Self { content: content.into(), metadata }
    }
}

/// A persisted (id, content, metadata, embedding) tuple.
///
/// Ids are assigned sequentially as `DOC-<index>` at ingestion time; they
/// are unique within one ingestion run, not across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    /// Record id, `DOC-0 … DOC-(n-1)` in chunk order.
    pub id: String,
    /// The chunk text.
    pub content: String,
    /// Normalized metadata.
    pub metadata: Metadata,
    /// The embedding vector for `content`.
    pub embedding: Vec<f32>,
}

/// A retrieved [`StoredRecord`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved record. Embeddings are not read back from the store.
    pub record: StoredRecord,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// Drop metadata entries whose value is JSON null or the empty string.
///
/// Every other entry passes through unchanged.
pub fn normalize_metadata(metadata: Metadata) -> Metadata {
    metadata
        .into_iter()
        .filter(|(_, v)| !v.is_null() && v.as_str() != Some(""))
        .collect()
}
