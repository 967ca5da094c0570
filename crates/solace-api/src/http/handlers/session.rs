//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions               - Create a session
//! - GET    /api/v1/sessions               - List the caller's sessions
//! - GET    /api/v1/sessions/{id}          - Get a single session
//! - DELETE /api/v1/sessions/{id}          - Delete a session
//! - GET    /api/v1/sessions/{id}/messages - Get messages for a session
//!
//! All routes require an API key; sessions belonging to other users are
//! indistinguishable from missing ones.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use solace_types::chat::{ChatMessage, ChatSession};

use super::parse_uuid;
use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// POST /api/v1/sessions - Create a new, untitled session.
pub async fn create_session(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<(StatusCode, Json<ChatSession>), AppError> {
    let session = state.chat_service.create_session(identity.user_id).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions - List the caller's sessions, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<ChatSession>>, AppError> {
    let sessions = state.chat_service.list_sessions(identity.user_id).await?;
    Ok(Json(sessions))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ChatSession>, AppError> {
    let sid = parse_uuid(&session_id)?;
    let session = state.chat_service.get_session(identity.user_id, sid).await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/{id} - Delete a session and its messages.
pub async fn delete_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sid = parse_uuid(&session_id)?;
    state
        .chat_service
        .delete_session(identity.user_id, sid)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// GET /api/v1/sessions/{id}/messages - Get messages in conversation order.
pub async fn get_messages(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let sid = parse_uuid(&session_id)?;
    let messages = state.chat_service.get_messages(identity.user_id, sid).await?;
    Ok(Json(messages))
}
