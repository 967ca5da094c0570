//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `solace-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool and writes on the writer pool. Emotion labels are stored as a JSON
//! array in a TEXT column.

use chrono::{DateTime, Utc};
use solace_core::chat::repository::SessionRepository;
use solace_types::chat::{ChatMessage, ChatRole, ChatSession};
use solace_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct SessionRow {
    id: String,
    user_id: String,
    title: Option<String>,
    created_at: String,
    message_count: i64,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            message_count: row.try_get("message_count")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatSession {
            id,
            user_id,
            title: self.title,
            created_at,
            message_count: self.message_count as u32,
        })
    }
}

struct MessageRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    emotions: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            emotions: row.try_get("emotions")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let role: ChatRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let emotions: Vec<String> = serde_json::from_str(&self.emotions)
            .map_err(|e| RepositoryError::Query(format!("invalid emotions column: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            session_id,
            role,
            content: self.content,
            emotions,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn encode_emotions(emotions: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(emotions)
        .map_err(|e| RepositoryError::Query(format!("unencodable emotions: {e}")))
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn create_session(
        &self,
        session: &ChatSession,
    ) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_sessions (id, user_id, title, created_at, message_count)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(&session.title)
        .bind(format_datetime(&session.created_at))
        .bind(session.message_count as i64)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session.clone())
    }

    async fn get_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn update_title(&self, session_id: &Uuid, title: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chat_sessions SET title = ? WHERE id = ?")
            .bind(title)
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_sessions(&self, user_id: &Uuid) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM chat_sessions WHERE user_id = ? ORDER BY created_at DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        // The insert and the counter bump must land together or not at all.
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO chat_messages (id, session_id, role, content, emotions, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(encode_emotions(&message.emotions)?)
        .bind(format_datetime(&message.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("UPDATE chat_sessions SET message_count = message_count + 1 WHERE id = ?")
            .bind(message.session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM chat_messages WHERE session_id = ? ORDER BY created_at ASC")
                .bind(session_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_session(user_id: Uuid) -> ChatSession {
        ChatSession {
            id: Uuid::now_v7(),
            user_id,
            title: None,
            created_at: Utc::now(),
            message_count: 0,
        }
    }

    fn make_message(session_id: Uuid, role: ChatRole, content: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            session_id,
            role,
            content: content.to_string(),
            emotions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let user_id = Uuid::now_v7();

        let session = make_session(user_id);
        let created = repo.create_session(&session).await.unwrap();
        assert_eq!(created.id, session.id);

        let found = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.user_id, user_id);
        assert!(found.title.is_none());
        assert_eq!(found.message_count, 0);
    }

    #[tokio::test]
    async fn test_get_missing_session_is_none() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let found = repo.get_session(&Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_title() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let session = make_session(Uuid::now_v7());
        repo.create_session(&session).await.unwrap();

        repo.update_title(&session.id, "I had a rough day").await.unwrap();

        let found = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("I had a rough day"));
    }

    #[tokio::test]
    async fn test_update_title_missing_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let result = repo.update_title(&Uuid::now_v7(), "title").await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let user_id = Uuid::now_v7();
        let other_user = Uuid::now_v7();

        let base = Utc::now();
        for offset in 0..3 {
            let mut session = make_session(user_id);
            session.created_at = base + Duration::seconds(offset);
            repo.create_session(&session).await.unwrap();
        }
        repo.create_session(&make_session(other_user)).await.unwrap();

        let sessions = repo.list_sessions(&user_id).await.unwrap();
        assert_eq!(sessions.len(), 3);
        assert!(sessions[0].created_at > sessions[1].created_at);
        assert!(sessions[1].created_at > sessions[2].created_at);
    }

    #[tokio::test]
    async fn test_delete_session_cascades_messages() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let session = make_session(Uuid::now_v7());
        repo.create_session(&session).await.unwrap();

        let msg = make_message(session.id, ChatRole::User, "Hello");
        repo.save_message(&msg).await.unwrap();

        repo.delete_session(&session.id).await.unwrap();

        assert!(repo.get_session(&session.id).await.unwrap().is_none());
        let messages = repo.get_messages(&session.id).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let result = repo.delete_session(&Uuid::now_v7()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_save_and_get_messages() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let session = make_session(Uuid::now_v7());
        repo.create_session(&session).await.unwrap();

        let mut msg1 = make_message(session.id, ChatRole::User, "I feel anxious");
        msg1.created_at = Utc::now();
        let mut msg2 = ChatMessage {
            emotions: vec!["fear".to_string(), "nervousness".to_string()],
            ..make_message(session.id, ChatRole::Bot, "That sounds difficult.")
        };
        msg2.created_at = msg1.created_at + Duration::seconds(1);

        repo.save_message(&msg1).await.unwrap();
        repo.save_message(&msg2).await.unwrap();

        let messages = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert!(messages[0].emotions.is_empty());
        assert_eq!(messages[1].role, ChatRole::Bot);
        assert_eq!(messages[1].emotions, vec!["fear", "nervousness"]);

        // Verify session message_count was incremented
        let updated = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(updated.message_count, 2);
    }

    #[tokio::test]
    async fn test_save_message_requires_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let msg = make_message(Uuid::now_v7(), ChatRole::User, "orphan");
        let result = repo.save_message(&msg).await;
        assert!(result.is_err(), "foreign key should reject orphan message");
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_partial_write() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let session = make_session(Uuid::now_v7());
        repo.create_session(&session).await.unwrap();

        let msg = make_message(session.id, ChatRole::User, "first");
        repo.save_message(&msg).await.unwrap();

        // Same primary key: the insert fails inside the transaction, so the
        // counter bump must be rolled back with it.
        let dup = ChatMessage {
            content: "duplicate id".to_string(),
            ..msg.clone()
        };
        assert!(repo.save_message(&dup).await.is_err());

        let found = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.message_count, 1);
        assert_eq!(repo.get_messages(&session.id).await.unwrap().len(), 1);
    }
}
