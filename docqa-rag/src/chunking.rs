//! Text chunking.
//!
//! [`CharacterChunker`] produces fixed-size character windows with a fixed
//! overlap between consecutive windows, matching the ingestion contract:
//! every chunk is at most `chunk_size` characters and consecutive chunks
//! from the same document share exactly `chunk_overlap` characters, except
//! possibly the last.

use serde_json::json;

use crate::document::Document;
use crate::error::{RagError, Result};

/// A strategy for splitting one document into ordered chunks.
///
/// Chunks are plain [`Document`]s; ids and embeddings are attached later
/// by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks, preserving source order.
    ///
    /// Returns an empty `Vec` if the document has no text to split.
    fn split(&self, document: &Document) -> Vec<Document>;
}

/// Splits text into overlapping windows counted in characters, not bytes,
/// so multi-byte text never lands on an invalid boundary.
///
/// Each chunk inherits the parent document's metadata plus a `chunk_index`
/// field.
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterChunker {
    /// The chunk size used by [`Default`]: 1000 characters.
    pub const DEFAULT_CHUNK_SIZE: usize = 1000;
    /// The overlap used by [`Default`]: 150 characters.
    pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

    /// Create a chunker with the given window size and overlap.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// The configured window size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The configured overlap in characters.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

impl Default for CharacterChunker {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker for CharacterChunker {
    fn split(&self, document: &Document) -> Vec<Document> {
        let text = &document.content;
        if text.trim().is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(char_count);
            let window = &text[boundaries[start]..boundaries[end]];

            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), json!(chunks.len()));
            chunks.push(Document::with_metadata(window, metadata));

            if end == char_count {
                break;
            }
            start += step;
        }

        chunks
    }
}
