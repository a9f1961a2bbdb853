//! The chat model trait.

use async_trait::async_trait;

use crate::error::Result;

/// A language model that turns a prompt into an answer.
///
/// Implementations wrap specific chat backends (OpenAI, Gemini) behind a
/// unified async interface. Generation parameters such as temperature are
/// fixed when the provider is constructed, not per call.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for the given prompt.
    ///
    /// Returns the model's answer as plain text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// The model identifier used for requests (e.g. `gpt-5-nano`).
    fn model_name(&self) -> &str;
}
