//! CompletionClient trait — the abstraction over the language model.
//!
//! The agent loop and the classifier both talk to the model through this
//! trait and never know which backend is behind it. The contract is
//! deliberately minimal: one prompt in, one free-text response out. No
//! streaming, no structured function calling — the loop's parser handles
//! the free-text convention end to end.

use crate::error::ClientError;
use async_trait::async_trait;

/// A synchronous-from-the-caller's-view completion call against an LLM.
///
/// Every model backend (OpenAI-compatible endpoint, scripted test double)
/// implements this trait.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "openai", "scripted").
    fn name(&self) -> &str;

    /// Send a prompt and get the complete text response.
    async fn complete(&self, prompt: &str) -> std::result::Result<String, ClientError>;
}
