//! Mock chat model for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::chat::ChatModel;
use crate::error::Result;

/// A [`ChatModel`] that returns a canned response and records every prompt
/// it receives.
///
/// Useful for asserting on the exact prompt a pipeline sends to the model.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_model::MockChatModel;
///
/// let model = MockChatModel::new("stub answer");
/// model.generate("question").await?;
/// assert_eq!(model.prompts()[0], "question");
/// ```
#[derive(Debug, Default)]
pub struct MockChatModel {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockChatModel {
    /// Create a mock that always answers with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into(), prompts: Mutex::new(Vec::new()) }
    }

    /// Return a copy of every prompt passed to [`generate`](ChatModel::generate).
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt lock poisoned").clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().expect("mock prompt lock poisoned").push(prompt.to_string());
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
