//! Stateless reply endpoint.
//!
//! POST /api/v1/chat - One-shot reply generation with no persistence.
//!
//! This route is unauthenticated and session-free: it takes a message and an
//! optional tone, and returns the emotion-tagged reply. Nothing is written to
//! the store and no events are published.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use solace_observe::genai_attrs as genai;
use solace_types::error::GatewayError;
use solace_types::tone::Tone;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /api/v1/chat.
///
/// `message` is optional at the serde level so that an absent field reaches
/// the handler and comes back as a 400 validation error instead of axum's
/// 422 deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Conversation tone; defaults to therapist.
    #[serde(default)]
    pub tone: Tone,
}

/// Response body for POST /api/v1/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub emotions: Vec<String>,
}

/// POST /api/v1/chat - Generate a one-shot emotion-tagged reply.
pub async fn generate_reply(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let span = tracing::info_span!(
        "chat",
        { genai::GEN_AI_OPERATION_NAME } = genai::OP_CHAT,
        { genai::GEN_AI_PROVIDER_NAME } = %state.config.gateway.provider,
        { genai::GEN_AI_REQUEST_MODEL } = %state.config.gateway.model,
        { genai::GEN_AI_REQUEST_TEMPERATURE } = state.config.gateway.temperature,
        { genai::GEN_AI_REQUEST_MAX_TOKENS } = state.config.gateway.max_tokens,
    );

    let message = request.message.as_deref().unwrap_or("");

    let reply = state
        .gateway
        .generate(message, request.tone)
        .instrument(span)
        .await
        .map_err(|e| match e {
            GatewayError::EmptyMessage => {
                AppError::Validation("Message is required".to_string())
            }
            GatewayError::Upstream(e) => AppError::Upstream {
                message: "Failed to generate response".to_string(),
                details: e.to_string(),
            },
        })?;

    Ok(Json(ChatResponse {
        response: reply.reply,
        emotions: reply.emotions,
    }))
}
