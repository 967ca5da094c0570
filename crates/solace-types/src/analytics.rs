//! Aggregated session statistics shapes.
//!
//! Produced by the pure aggregation function in `solace-core` and returned
//! by the stats endpoint.

use serde::{Deserialize, Serialize};

/// How many days back a session still counts as "recent".
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Maximum number of ranked emotions reported.
pub const TOP_EMOTIONS_LIMIT: usize = 10;

/// Frequency of one emotion label across all bot messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub label: String,
    pub count: u64,
}

/// Summary counters over the full set of a user's sessions.
///
/// Only produced for a non-empty session list; zero sessions is reported as
/// "no data" by the aggregation function, never a division by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalytics {
    pub total_sessions: u64,
    pub total_messages: u64,
    /// Integer-rounded `total_messages / total_sessions`.
    pub avg_messages_per_session: u64,
    /// Sessions created strictly within the last [`RECENT_WINDOW_DAYS`] days.
    pub recent_sessions: u64,
    /// Emotion frequency over bot messages, descending by count, ties broken
    /// by first-encountered order, truncated to [`TOP_EMOTIONS_LIMIT`].
    pub top_emotions: Vec<EmotionCount>,
    pub user_messages: u64,
    pub bot_messages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_serialize() {
        let analytics = SessionAnalytics {
            total_sessions: 3,
            total_messages: 12,
            avg_messages_per_session: 4,
            recent_sessions: 1,
            top_emotions: vec![EmotionCount {
                label: "joy".to_string(),
                count: 5,
            }],
            user_messages: 6,
            bot_messages: 6,
        };
        let json = serde_json::to_string(&analytics).unwrap();
        assert!(json.contains("\"total_sessions\":3"));
        assert!(json.contains("\"label\":\"joy\""));
    }
}
