//! Model client implementations for Troupe.
//!
//! One backend: any OpenAI-compatible `/chat/completions` endpoint
//! (OpenAI, OpenRouter, Ollama, vLLM, ...). The agent core only sees the
//! `CompletionClient` trait from `troupe-core`.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;

use std::sync::Arc;
use troupe_config::AppConfig;
use troupe_core::CompletionClient;

/// Build the configured completion client.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn CompletionClient> {
    Arc::new(OpenAiCompatClient::new(
        "openai",
        &config.base_url,
        config.api_key.clone().unwrap_or_default(),
        &config.model,
        config.temperature,
    ))
}
