use thiserror::Error;

/// Errors from repository operations (used by trait definitions in solace-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the reply gateway.
///
/// Malformed provider payloads never surface here; they are absorbed by the
/// parse fallback chain. Only input validation and upstream transport
/// failures escape the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("message is required")]
    EmptyMessage,

    #[error("upstream completion failed: {0}")]
    Upstream(#[from] crate::llm::LlmError),
}

/// Errors from the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message is required")]
    EmptyMessage,

    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
