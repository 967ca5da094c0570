//! LlmProvider trait definition.
//!
//! Implementations live in solace-infra (e.g., `OpenAiCompatibleProvider`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use solace_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// A completion provider the reply gateway can call.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Issue a single non-streaming completion.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
