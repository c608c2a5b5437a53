//! AI client error types.

use thiserror::Error;

/// Errors from the AI commentary client.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured for the model provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// The model returned a response with no text content.
    #[error("Empty response from model")]
    EmptyResponse,

    /// The provider rejected or failed the request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A transport-level error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}
