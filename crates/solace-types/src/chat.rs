//! Chat session and message types for Solace.
//!
//! Sessions are per-user conversation threads; messages are immutable once
//! appended and ordered by creation time within a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Placeholder title for a session whose first user message has not arrived yet.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Maximum number of characters kept when deriving a title from the first
/// user message.
pub const TITLE_MAX_CHARS: usize = 30;

/// Author of a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ChatRole::User),
            "bot" => Ok(ChatRole::Bot),
            other => Err(format!("invalid chat role: '{other}'")),
        }
    }
}

/// A chat session belonging to one user.
///
/// `title` stays `None` until the first user message arrives, at which point
/// it is derived once and never edited again. Sessions are listed newest
/// first by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub message_count: u32,
}

impl ChatSession {
    /// Title for display: the derived title, or the placeholder.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_SESSION_TITLE)
    }
}

/// A single message within a chat session.
///
/// Immutable once appended. `emotions` is populated only for `Bot` messages;
/// labels outside the known vocabulary are accepted and render with the
/// neutral style, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Derive a session title from the first user message.
///
/// The message is trimmed and truncated to [`TITLE_MAX_CHARS`] characters
/// (character boundary safe); a blank message falls back to the placeholder.
pub fn derive_title(first_user_message: &str) -> String {
    let trimmed = first_user_message.trim();
    if trimmed.is_empty() {
        return DEFAULT_SESSION_TITLE.to_string();
    }
    trimmed.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_role_roundtrip() {
        for role in [ChatRole::User, ChatRole::Bot] {
            let s = role.to_string();
            let parsed: ChatRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_chat_role_serde() {
        let json = serde_json::to_string(&ChatRole::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: ChatRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ChatRole::Bot);
    }

    #[test]
    fn test_display_title_placeholder() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            title: None,
            created_at: Utc::now(),
            message_count: 0,
        };
        assert_eq!(session.display_title(), DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn test_derive_title_truncates_to_thirty_chars() {
        let long = "a".repeat(80);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_derive_title_short_message_kept_whole() {
        assert_eq!(derive_title("I had a rough day"), "I had a rough day");
    }

    #[test]
    fn test_derive_title_blank_falls_back() {
        assert_eq!(derive_title("   "), DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn test_derive_title_multibyte_safe() {
        let msg = "é".repeat(40);
        let title = derive_title(&msg);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_message_emotions_default_empty() {
        let json = r#"{
            "id": "0191d5a8-0000-7000-8000-000000000000",
            "session_id": "0191d5a8-0000-7000-8000-000000000001",
            "role": "user",
            "content": "hello",
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(msg.emotions.is_empty());
    }
}
