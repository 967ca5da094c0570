//! Message turn handler.
//!
//! POST /api/v1/sessions/{id}/messages - Run a full message turn: persist the
//! user message, derive the title if this is the first one, generate the bot
//! reply, persist it, and return both halves. An upstream completion failure
//! still returns 200 with the fallback bot message; the turn is on record
//! either way.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use solace_types::chat::ChatMessage;
use solace_types::tone::Tone;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// Request body for POST /api/v1/sessions/{id}/messages.
///
/// `message` is optional at the serde level so an absent field maps to a
/// 400 validation error rather than a 422 deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub tone: Tone,
}

/// Both halves of the completed turn.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub user_message: ChatMessage,
    pub bot_message: ChatMessage,
}

/// POST /api/v1/sessions/{id}/messages - Run one message turn.
pub async fn send_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let sid = super::parse_uuid(&session_id)?;

    let turn = state
        .chat_service
        .send_message(
            &state.gateway,
            identity.user_id,
            sid,
            request.message.as_deref().unwrap_or(""),
            request.tone,
        )
        .await?;

    Ok(Json(SendMessageResponse {
        user_message: turn.user_message,
        bot_message: turn.bot_message,
    }))
}
