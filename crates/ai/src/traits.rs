//! Completion model abstraction.

use async_trait::async_trait;

use crate::error::AiError;

/// A model that turns one prompt into one text reply.
///
/// Services program against this trait; [`AnthropicClient`](crate::AnthropicClient)
/// is the production implementation.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}
