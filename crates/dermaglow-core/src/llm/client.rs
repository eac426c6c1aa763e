//! LlmClient trait definition.
//!
//! The abstraction every language-model backend implements: one completion
//! request in, one markdown answer out. No retry, no caching, no streaming
//! -- a single upstream failure aborts the calling operation.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in dermaglow-infra (e.g., `OpenAiClient`); tests
//! substitute in-memory fakes.

use dermaglow_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
pub trait LlmClient: Send + Sync {
    /// Human-readable client name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
