//! Pure aggregation over the session collection.
//!
//! [`aggregate`] folds sessions and messages into a [`SessionAnalytics`]
//! snapshot. It takes the observation time as an argument so recency is
//! deterministic under test. No storage access happens here; callers load
//! the data and hand it over.

use chrono::{DateTime, Duration, Utc};
use solace_types::analytics::{EmotionCount, RECENT_WINDOW_DAYS, SessionAnalytics, TOP_EMOTIONS_LIMIT};
use solace_types::chat::{ChatMessage, ChatRole, ChatSession};

/// Aggregate analytics over a user's sessions and their messages.
///
/// Returns `None` when there are no sessions; callers render that as the
/// explicit no-data state rather than a zero-filled snapshot. The average
/// is rounded to the nearest whole message. A session counts as recent
/// when it was created strictly later than `now` minus seven days.
pub fn aggregate(
    sessions: &[ChatSession],
    messages: &[ChatMessage],
    now: DateTime<Utc>,
) -> Option<SessionAnalytics> {
    if sessions.is_empty() {
        return None;
    }

    let total_sessions = sessions.len() as u64;
    let total_messages = messages.len() as u64;
    let avg_messages_per_session =
        (total_messages as f64 / total_sessions as f64).round() as u64;

    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent_sessions = sessions.iter().filter(|s| s.created_at > cutoff).count() as u64;

    let user_messages = messages.iter().filter(|m| m.role == ChatRole::User).count() as u64;
    let bot_messages = total_messages - user_messages;

    Some(SessionAnalytics {
        total_sessions,
        total_messages,
        avg_messages_per_session,
        recent_sessions,
        top_emotions: top_emotions(messages),
        user_messages,
        bot_messages,
    })
}

/// Rank emotion labels by frequency across bot messages, most frequent
/// first, capped at ten.
///
/// Only bot messages carry detected emotions; labels on user messages are
/// never counted. Counts are kept in first-seen order and the sort is
/// stable, so labels with equal counts keep the order they first appeared
/// in.
fn top_emotions(messages: &[ChatMessage]) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    for label in messages
        .iter()
        .filter(|m| m.role == ChatRole::Bot)
        .flat_map(|m| m.emotions.iter())
    {
        match counts.iter_mut().find(|c| c.label == *label) {
            Some(entry) => entry.count += 1,
            None => counts.push(EmotionCount {
                label: label.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_EMOTIONS_LIMIT);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session_at(user_id: Uuid, created_at: DateTime<Utc>) -> ChatSession {
        ChatSession {
            id: Uuid::now_v7(),
            user_id,
            title: None,
            created_at,
            message_count: 0,
        }
    }

    fn message(session_id: Uuid, role: ChatRole, emotions: &[&str]) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            session_id,
            role,
            content: "text".to_string(),
            emotions: emotions.iter().map(|e| e.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_sessions_yields_none() {
        assert!(aggregate(&[], &[], Utc::now()).is_none());
    }

    #[test]
    fn totals_and_role_counts() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let session = session_at(user_id, now);
        let messages = vec![
            message(session.id, ChatRole::User, &[]),
            message(session.id, ChatRole::Bot, &["joy"]),
            message(session.id, ChatRole::User, &[]),
            message(session.id, ChatRole::Bot, &["neutral"]),
        ];

        let stats = aggregate(&[session], &messages, now).unwrap();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.user_messages, 2);
        assert_eq!(stats.bot_messages, 2);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let sessions = vec![session_at(user_id, now), session_at(user_id, now)];
        // 3 messages over 2 sessions: 1.5 rounds to 2.
        let messages = vec![
            message(sessions[0].id, ChatRole::User, &[]),
            message(sessions[0].id, ChatRole::Bot, &[]),
            message(sessions[1].id, ChatRole::User, &[]),
        ];

        let stats = aggregate(&sessions, &messages, now).unwrap();
        assert_eq!(stats.avg_messages_per_session, 2);
    }

    #[test]
    fn recency_window_is_strict() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let sessions = vec![
            session_at(user_id, now - Duration::days(1)),
            // Exactly on the boundary: not recent.
            session_at(user_id, now - Duration::days(RECENT_WINDOW_DAYS)),
            session_at(user_id, now - Duration::days(30)),
        ];

        let stats = aggregate(&sessions, &[], now).unwrap();
        assert_eq!(stats.recent_sessions, 1);
    }

    #[test]
    fn emotion_ranking_is_frequency_ordered() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let session = session_at(user_id, now);
        let messages = vec![
            message(session.id, ChatRole::Bot, &["sadness", "joy"]),
            message(session.id, ChatRole::Bot, &["sadness"]),
            message(session.id, ChatRole::Bot, &["sadness", "fear"]),
            message(session.id, ChatRole::Bot, &["fear"]),
        ];

        let stats = aggregate(&[session], &messages, now).unwrap();
        let labels: Vec<&str> = stats.top_emotions.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["sadness", "fear", "joy"]);
        assert_eq!(stats.top_emotions[0].count, 3);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let session = session_at(user_id, now);
        let messages = vec![
            message(session.id, ChatRole::Bot, &["grief", "relief"]),
            message(session.id, ChatRole::Bot, &["relief", "grief"]),
        ];

        let stats = aggregate(&[session], &messages, now).unwrap();
        let labels: Vec<&str> = stats.top_emotions.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["grief", "relief"]);
    }

    #[test]
    fn user_message_labels_are_not_counted() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let session = session_at(user_id, now);
        let messages = vec![
            message(session.id, ChatRole::User, &["joy"]),
            message(session.id, ChatRole::Bot, &["sadness"]),
        ];

        let stats = aggregate(&[session], &messages, now).unwrap();
        let labels: Vec<&str> = stats.top_emotions.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["sadness"]);
    }

    #[test]
    fn ranking_is_capped_at_ten() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let session = session_at(user_id, now);
        let labels: Vec<String> = (0..15).map(|i| format!("emotion{i}")).collect();
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        let messages = vec![message(session.id, ChatRole::Bot, &label_refs)];

        let stats = aggregate(&[session], &messages, now).unwrap();
        assert_eq!(stats.top_emotions.len(), TOP_EMOTIONS_LIMIT);
    }

    #[test]
    fn messageless_sessions_average_to_zero() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let stats = aggregate(&[session_at(user_id, now)], &[], now).unwrap();
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.avg_messages_per_session, 0);
        assert!(stats.top_emotions.is_empty());
    }
}
