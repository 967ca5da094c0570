//! Live-update events emitted after every successful store write.
//!
//! Subscribers (the SSE endpoint) receive these and re-derive their view
//! state atomically per notification. Events carry the owning user id so
//! per-user streams can filter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{ChatMessage, ChatSession};

/// A change to a user's session collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionCreated {
        user_id: Uuid,
        session: ChatSession,
    },
    MessageAppended {
        user_id: Uuid,
        session_id: Uuid,
        message: ChatMessage,
    },
    TitleUpdated {
        user_id: Uuid,
        session_id: Uuid,
        title: String,
    },
    SessionDeleted {
        user_id: Uuid,
        session_id: Uuid,
    },
}

impl SessionEvent {
    /// The user whose session collection changed.
    pub fn user_id(&self) -> Uuid {
        match self {
            SessionEvent::SessionCreated { user_id, .. }
            | SessionEvent::MessageAppended { user_id, .. }
            | SessionEvent::TitleUpdated { user_id, .. }
            | SessionEvent::SessionDeleted { user_id, .. } => *user_id,
        }
    }
}
