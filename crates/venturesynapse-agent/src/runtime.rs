// ABOUTME: Defines the CompletionRuntime trait that every chat-completion provider adapter implements.
// ABOUTME: Also defines CompletionError, the failures a provider call can produce.

use async_trait::async_trait;

use venturesynapse_core::ChatMessage;

/// Errors that can occur while requesting a completion.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,
}

/// Trait that all chat-completion adapters implement. An adapter turns a
/// system prompt plus conversation history into one API call and returns
/// the generated text.
#[async_trait]
pub trait CompletionRuntime: Send + Sync {
    /// Generate the next assistant message for `history`, steered by `system_prompt`.
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, CompletionError>;

    /// Provider name for logging and display (e.g. "openai", "azure").
    fn provider_name(&self) -> &str;

    /// Model or deployment identifier being used.
    fn model_name(&self) -> &str;
}
