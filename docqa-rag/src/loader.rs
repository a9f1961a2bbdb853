//! Document loaders.
//!
//! The shipped implementation is [`PdfLoader`], which reads a PDF into one
//! [`Document`] per page using the `pdf-extract` crate.

use std::path::Path;

use serde_json::json;
use tracing::{debug, error};

use crate::document::{Document, Metadata};
use crate::error::{RagError, Result};

/// Reads a source file into an ordered sequence of page-level documents.
pub trait DocumentLoader: Send + Sync {
    /// Load the file at `path` into one [`Document`] per page, in page order.
    ///
    /// Each document carries `source` (the path as given) and `page`
    /// (zero-based page index) metadata.
    fn load(&self, path: &Path) -> Result<Vec<Document>>;
}

/// A [`DocumentLoader`] for PDF files.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Create a new PDF loader.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let source_path = path.display().to_string();

        if !path.is_file() {
            return Err(RagError::Load {
                source_path,
                message: "no such file".to_string(),
            });
        }

        let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| {
            error!(source = %source_path, error = %e, "PDF extraction failed");
            RagError::Load { source_path: source_path.clone(), message: e.to_string() }
        })?;

        debug!(source = %source_path, page_count = pages.len(), "loaded PDF");

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(page, text)| {
                let metadata: Metadata = [
                    ("source".to_string(), json!(source_path)),
                    ("page".to_string(), json!(page)),
                ]
                .into_iter()
                .collect();
                Document::with_metadata(text, metadata)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_load_error() {
        let err = PdfLoader::new().load(Path::new("/nonexistent/file.pdf")).unwrap_err();
        match err {
            RagError::Load { source_path, .. } => {
                assert_eq!(source_path, "/nonexistent/file.pdf");
            }
            other => panic!("expected Load error, got {other:?}"),
        }
    }
}
