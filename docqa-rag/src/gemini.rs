//! Gemini embedding provider using the Google Generative Language API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Base URL for the Generative Language API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Dimensionality of `gemini-embedding-001`.
const DEFAULT_DIMENSIONS: usize = 3072;

/// An [`EmbeddingProvider`] backed by the Gemini `embedContent` and
/// `batchEmbedContents` endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::gemini::GeminiEmbeddings;
///
/// let embedder = GeminiEmbeddings::new("AIza...", "gemini-embedding-001")?;
/// let vector = embedder.embed("hello world").await?;
/// ```
#[derive(Debug)]
pub struct GeminiEmbeddings {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbeddings {
    /// Create a new provider with the given API key and embedding model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Embedding {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        let model = model.into();
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new provider using the `GOOGLE_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| RagError::Embedding {
            provider: "Gemini".into(),
            message: "GOOGLE_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key, model)
    }

    /// Override the dimensionality reported by
    /// [`dimensions()`](EmbeddingProvider::dimensions), for models other
    /// than `gemini-embedding-001`.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    fn qualified_model(&self) -> String {
        format!("models/{}", self.model)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let url = format!("{GEMINI_BASE_URL}/models/{}:{endpoint}", self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "request failed");
                RagError::Embedding {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!(provider = "Gemini", %status, "API error");
            return Err(RagError::Embedding {
                provider: "Gemini".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse response");
            RagError::Embedding {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })
    }
}

// ── Generative Language API request/response types ─────────────────

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Gemini", model = %self.model, text_len = text.len(), "embedding text");

        let model = self.qualified_model();
        let request = EmbedContentRequest {
            model: &model,
            content: Content { parts: vec![Part { text }] },
        };

        let response: EmbedContentResponse = self.post_json("embedContent", &request).await?;
        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Gemini", model = %self.model, batch_size = texts.len(), "embedding batch");

        let model = self.qualified_model();
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: &model,
                    content: Content { parts: vec![Part { text }] },
                })
                .collect(),
        };

        let response: BatchEmbedResponse = self.post_json("batchEmbedContents", &request).await?;
        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err = GeminiEmbeddings::new("", "gemini-embedding-001").unwrap_err();
        assert!(matches!(err, RagError::Embedding { .. }));
    }

    #[test]
    fn models_prefix_is_normalized() {
        let embedder = GeminiEmbeddings::new("key", "models/gemini-embedding-001").unwrap();
        assert_eq!(embedder.qualified_model(), "models/gemini-embedding-001");
    }
}
