//! API key identity types.
//!
//! Every authenticated request resolves to an [`ApiKeyRecord`] whose
//! `user_id` scopes session ownership. The raw key is shown once at
//! creation time; only its SHA-256 hash is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored API key, without the key material itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: Uuid,
    /// Human-readable label chosen at creation time.
    pub name: String,
    /// The user this key acts as.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}
