//! # docqa-model
//!
//! Chat model providers for the docqa question-answering pipeline.
//!
//! The crate exposes a single seam, [`ChatModel`], with two concrete
//! providers behind it:
//!
//! - [`OpenAiChatModel`] — OpenAI chat completions API
//! - [`GeminiChatModel`] — Google Generative Language API
//!
//! Plus [`MockChatModel`] for tests. Providers are single-shot: one prompt
//! in, one answer text out, at a temperature fixed at construction.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_model::{ChatModel, OpenAiChatModel};
//!
//! let model = OpenAiChatModel::from_env("gpt-5-nano")?.with_temperature(0.1);
//! let answer = model.generate("Why is the sky blue?").await?;
//! ```

mod chat;
mod error;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use chat::ChatModel;
pub use error::{ModelError, Result};
pub use gemini::GeminiChatModel;
pub use mock::MockChatModel;
pub use openai::OpenAiChatModel;
