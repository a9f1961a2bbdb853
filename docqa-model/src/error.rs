//! Error types for the `docqa-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to a chat model provider.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider request failed or returned an unusable response.
    #[error("Chat error ({provider}): {message}")]
    Chat {
        /// The chat provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A provider was constructed with invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for chat model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
