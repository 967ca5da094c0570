//! Analytics endpoint.
//!
//! GET /api/v1/stats - Aggregate the caller's sessions into a
//! [`SessionAnalytics`] snapshot.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::json;

use solace_core::analytics::aggregate;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// GET /api/v1/stats - Aggregate analytics for the caller's sessions.
///
/// A user with no sessions gets `{"no_data": true}` rather than a
/// zero-filled snapshot.
pub async fn get_stats(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, AppError> {
    let sessions = state.chat_service.list_sessions(identity.user_id).await?;

    let mut messages = Vec::new();
    for session in &sessions {
        messages.extend(
            state
                .chat_service
                .get_messages(identity.user_id, session.id)
                .await?,
        );
    }

    match aggregate(&sessions, &messages, Utc::now()) {
        Some(stats) => Ok(Json(
            serde_json::to_value(stats)
                .map_err(|e| AppError::Internal(format!("Failed to encode stats: {e}")))?,
        )),
        None => Ok(Json(json!({ "no_data": true }))),
    }
}
