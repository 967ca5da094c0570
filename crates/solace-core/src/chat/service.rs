//! Chat service orchestrating session lifecycle and message persistence.
//!
//! ChatService coordinates between the SessionRepository, the ReplyGateway,
//! and the EventBus to manage the full conversation lifecycle: creating
//! sessions, running message turns, deriving titles, and deleting sessions.
//! Every caller supplies the acting user explicitly; ownership of a session
//! is checked on every read and write.

use chrono::Utc;
use solace_types::chat::{ChatMessage, ChatRole, ChatSession, derive_title};
use solace_types::error::{ChatError, GatewayError, RepositoryError};
use solace_types::event::SessionEvent;
use solace_types::tone::Tone;
use tracing::{error, info};
use uuid::Uuid;

use crate::chat::repository::SessionRepository;
use crate::event::bus::EventBus;
use crate::gateway::ReplyGateway;
use crate::llm::provider::LlmProvider;

/// Bot reply persisted when the completion provider fails mid-turn.
///
/// The user message is already saved at that point, so the turn completes
/// with this apology instead of surfacing the upstream error.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Both halves of a completed message turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub user_message: ChatMessage,
    pub bot_message: ChatMessage,
}

/// Orchestrates chat session lifecycle and message persistence.
///
/// Generic over `SessionRepository` to maintain clean architecture
/// (solace-core never depends on solace-infra).
pub struct ChatService<R: SessionRepository> {
    repository: R,
    events: EventBus,
}

impl<R: SessionRepository> ChatService<R> {
    /// Create a new chat service with the given repository and event bus.
    pub fn new(repository: R, events: EventBus) -> Self {
        Self { repository, events }
    }

    /// Access the event bus, e.g. for subscribing live views.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // --- Session lifecycle ---

    /// Create a new chat session for a user.
    ///
    /// The session starts untitled; the title is derived once from the
    /// first user message.
    pub async fn create_session(&self, user_id: Uuid) -> Result<ChatSession, ChatError> {
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id,
            title: None,
            created_at: Utc::now(),
            message_count: 0,
        };

        let session = self.repository.create_session(&session).await?;
        info!(session_id = %session.id, "Session created");
        self.events.publish(SessionEvent::SessionCreated {
            user_id,
            session: session.clone(),
        });
        Ok(session)
    }

    /// Get a session by ID, verifying it belongs to `user_id`.
    pub async fn get_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<ChatSession, ChatError> {
        self.require_owned(user_id, &session_id).await
    }

    /// List the user's sessions, most recent first.
    pub async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.repository.list_sessions(&user_id).await?)
    }

    /// Delete a session and its messages, verifying ownership first.
    pub async fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<(), ChatError> {
        self.require_owned(user_id, &session_id).await?;
        self.repository.delete_session(&session_id).await?;
        info!(session_id = %session_id, "Session deleted");
        self.events
            .publish(SessionEvent::SessionDeleted { user_id, session_id });
        Ok(())
    }

    /// Get a session's messages in conversation order, verifying ownership.
    pub async fn get_messages(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.require_owned(user_id, &session_id).await?;
        Ok(self.repository.get_messages(&session_id).await?)
    }

    // --- Message turns ---

    /// Run one message turn in a session.
    ///
    /// Persists the user message, derives the session title from it if the
    /// session is still untitled, asks the gateway for a reply, and persists
    /// the bot message. An upstream completion failure does not fail the
    /// turn: the bot half becomes [`FALLBACK_REPLY`] tagged `neutral`.
    pub async fn send_message<P: LlmProvider>(
        &self,
        gateway: &ReplyGateway<P>,
        user_id: Uuid,
        session_id: Uuid,
        content: &str,
        tone: Tone,
    ) -> Result<ChatTurn, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let session = self.require_owned(user_id, &session_id).await?;

        let user_message = self
            .save_message(user_id, session_id, ChatRole::User, content.to_string(), Vec::new())
            .await?;

        if session.title.is_none() {
            let title = derive_title(content);
            self.repository.update_title(&session_id, &title).await?;
            self.events.publish(SessionEvent::TitleUpdated {
                user_id,
                session_id,
                title,
            });
        }

        let reply = match gateway.generate(content, tone).await {
            Ok(reply) => reply,
            Err(GatewayError::EmptyMessage) => return Err(ChatError::EmptyMessage),
            Err(GatewayError::Upstream(e)) => {
                error!(session_id = %session_id, error = %e, "Reply generation failed");
                crate::gateway::BotReply {
                    reply: FALLBACK_REPLY.to_string(),
                    emotions: vec!["neutral".to_string()],
                }
            }
        };

        let bot_message = self
            .save_message(user_id, session_id, ChatRole::Bot, reply.reply, reply.emotions)
            .await?;

        Ok(ChatTurn {
            user_message,
            bot_message,
        })
    }

    async fn save_message(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        role: ChatRole,
        content: String,
        emotions: Vec<String>,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id,
            role,
            content,
            emotions,
            created_at: Utc::now(),
        };

        self.repository.save_message(&message).await?;
        self.events.publish(SessionEvent::MessageAppended {
            user_id,
            session_id,
            message: message.clone(),
        });
        Ok(message)
    }

    async fn require_owned(
        &self,
        user_id: Uuid,
        session_id: &Uuid,
    ) -> Result<ChatSession, ChatError> {
        match self.repository.get_session(session_id).await? {
            Some(session) if session.user_id == user_id => Ok(session),
            // A foreign session is indistinguishable from a missing one.
            _ => Err(ChatError::SessionNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_types::config::GatewayConfig;
    use solace_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
    use std::sync::Mutex;

    /// In-memory repository for exercising the service without a database.
    #[derive(Default)]
    struct MemoryRepository {
        sessions: Mutex<Vec<ChatSession>>,
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl SessionRepository for MemoryRepository {
        async fn create_session(
            &self,
            session: &ChatSession,
        ) -> Result<ChatSession, RepositoryError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(session.clone())
        }

        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == *session_id)
                .cloned())
        }

        async fn update_title(
            &self,
            session_id: &Uuid,
            title: &str,
        ) -> Result<(), RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .iter_mut()
                .find(|s| s.id == *session_id)
                .ok_or(RepositoryError::NotFound)?;
            session.title = Some(title.to_string());
            Ok(())
        }

        async fn list_sessions(&self, user_id: &Uuid) -> Result<Vec<ChatSession>, RepositoryError> {
            let mut sessions: Vec<ChatSession> = self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.user_id == *user_id)
                .cloned()
                .collect();
            sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(sessions)
        }

        async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
            self.sessions.lock().unwrap().retain(|s| s.id != *session_id);
            self.messages
                .lock()
                .unwrap()
                .retain(|m| m.session_id != *session_id);
            Ok(())
        }

        async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .iter_mut()
                .find(|s| s.id == message.session_id)
                .ok_or(RepositoryError::NotFound)?;
            session.message_count += 1;
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn get_messages(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.session_id == *session_id)
                .cloned()
                .collect())
        }
    }

    /// Canned provider returning a fixed body or a fixed failure.
    struct StubProvider {
        body: Result<String, ()>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match &self.body {
                Ok(content) => Ok(CompletionResponse {
                    id: "cmpl-1".to_string(),
                    content: content.clone(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                Err(()) => Err(LlmError::Provider {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    fn service() -> ChatService<MemoryRepository> {
        ChatService::new(MemoryRepository::default(), EventBus::new(16))
    }

    fn gateway(body: Result<String, ()>) -> ReplyGateway<StubProvider> {
        ReplyGateway::new(StubProvider { body }, GatewayConfig::default())
    }

    #[tokio::test]
    async fn create_and_list_sessions() {
        let service = service();
        let user_id = Uuid::now_v7();

        let session = service.create_session(user_id).await.unwrap();
        assert!(session.title.is_none());
        assert_eq!(session.message_count, 0);

        let sessions = service.list_sessions(user_id).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, session.id);
    }

    #[tokio::test]
    async fn send_message_persists_both_halves() {
        let service = service();
        let gateway = gateway(Ok(r#"{"emotions":["joy"],"reply":"Hello"}"#.to_string()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();

        let turn = service
            .send_message(&gateway, user_id, session.id, "hi there", Tone::Therapist)
            .await
            .unwrap();

        assert_eq!(turn.user_message.role, ChatRole::User);
        assert_eq!(turn.user_message.content, "hi there");
        assert!(turn.user_message.emotions.is_empty());
        assert_eq!(turn.bot_message.role, ChatRole::Bot);
        assert_eq!(turn.bot_message.content, "Hello");
        assert_eq!(turn.bot_message.emotions, vec!["joy"]);

        let messages = service.get_messages(user_id, session.id).await.unwrap();
        assert_eq!(messages.len(), 2);

        let session = service.get_session(user_id, session.id).await.unwrap();
        assert_eq!(session.message_count, 2);
    }

    #[tokio::test]
    async fn first_user_message_derives_title_once() {
        let service = service();
        let gateway = gateway(Ok(r#"{"emotions":["joy"],"reply":"ok"}"#.to_string()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();

        service
            .send_message(&gateway, user_id, session.id, "I had a rough day at work today", Tone::Therapist)
            .await
            .unwrap();
        let titled = service.get_session(user_id, session.id).await.unwrap();
        assert_eq!(titled.title.as_deref(), Some("I had a rough day at work toda"));

        service
            .send_message(&gateway, user_id, session.id, "second message", Tone::Therapist)
            .await
            .unwrap();
        let still = service.get_session(user_id, session.id).await.unwrap();
        assert_eq!(still.title, titled.title);
    }

    #[tokio::test]
    async fn upstream_failure_persists_fallback_bot_message() {
        let service = service();
        let gateway = gateway(Err(()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();

        let turn = service
            .send_message(&gateway, user_id, session.id, "hello", Tone::Supportive)
            .await
            .unwrap();

        assert_eq!(turn.bot_message.content, FALLBACK_REPLY);
        assert_eq!(turn.bot_message.emotions, vec!["neutral"]);

        // The user half is still on record.
        let messages = service.get_messages(user_id, session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
    }

    #[tokio::test]
    async fn blank_message_rejected_without_persisting() {
        let service = service();
        let gateway = gateway(Ok("unused".to_string()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();

        let err = service
            .send_message(&gateway, user_id, session.id, "   ", Tone::Therapist)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));

        let messages = service.get_messages(user_id, session.id).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn foreign_session_is_not_found() {
        let service = service();
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();
        let session = service.create_session(owner).await.unwrap();

        let err = service.get_session(stranger, session.id).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));

        let err = service
            .delete_session(stranger, session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }

    #[tokio::test]
    async fn turn_publishes_events_in_order() {
        let service = service();
        let gateway = gateway(Ok(r#"{"emotions":["joy"],"reply":"ok"}"#.to_string()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();

        let mut rx = service.events().subscribe();
        service
            .send_message(&gateway, user_id, session.id, "hello", Tone::Cheerful)
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::MessageAppended { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::TitleUpdated { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::MessageAppended { .. }
        ));
    }

    #[tokio::test]
    async fn delete_session_removes_messages() {
        let service = service();
        let gateway = gateway(Ok(r#"{"emotions":["joy"],"reply":"ok"}"#.to_string()));
        let user_id = Uuid::now_v7();
        let session = service.create_session(user_id).await.unwrap();
        service
            .send_message(&gateway, user_id, session.id, "hello", Tone::Therapist)
            .await
            .unwrap();

        service.delete_session(user_id, session.id).await.unwrap();

        let err = service.get_messages(user_id, session.id).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
        assert!(service.list_sessions(user_id).await.unwrap().is_empty());
    }
}
