//! API key storage and verification.
//!
//! Keys look like `sk-solace-<32 alphanumeric chars>`. The raw key is
//! returned exactly once at creation time; the database only ever holds
//! its lowercase hex SHA-256 digest, so a leaked database cannot be
//! replayed against the API.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};
use solace_types::error::RepositoryError;
use solace_types::identity::ApiKeyRecord;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

const KEY_PREFIX: &str = "sk-solace-";
const KEY_RANDOM_CHARS: usize = 32;

/// Generate a fresh raw API key.
pub fn generate_api_key() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_RANDOM_CHARS)
        .map(char::from)
        .collect();
    format!("{KEY_PREFIX}{suffix}")
}

/// Lowercase hex SHA-256 digest of a raw key.
pub fn hash_api_key(raw_key: &str) -> String {
    format!("{:x}", Sha256::digest(raw_key.as_bytes()))
}

/// SQLite-backed API key store.
pub struct SqliteApiKeyRepository {
    pool: DatabasePool,
}

impl SqliteApiKeyRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create a new key acting as `user_id`.
    ///
    /// Returns the raw key alongside the stored record; the raw key is
    /// not recoverable afterwards.
    pub async fn create(
        &self,
        name: &str,
        user_id: Uuid,
    ) -> Result<(String, ApiKeyRecord), RepositoryError> {
        let raw_key = generate_api_key();
        let record = ApiKeyRecord {
            id: Uuid::now_v7(),
            name: name.to_string(),
            user_id,
            created_at: Utc::now(),
            last_used_at: None,
        };

        sqlx::query(
            r#"INSERT INTO api_keys (id, key_hash, name, user_id, created_at, last_used_at)
               VALUES (?, ?, ?, ?, ?, NULL)"#,
        )
        .bind(record.id.to_string())
        .bind(hash_api_key(&raw_key))
        .bind(&record.name)
        .bind(record.user_id.to_string())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok((raw_key, record))
    }

    /// Look up the record for a raw key, stamping `last_used_at` on a hit.
    pub async fn find_by_key(
        &self,
        raw_key: &str,
    ) -> Result<Option<ApiKeyRecord>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM api_keys WHERE key_hash = ?")
            .bind(hash_api_key(raw_key))
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = ApiKeyRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_record()?;

        sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(record.id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Some(record))
    }

    /// List all keys, newest first.
    pub async fn list(&self) -> Result<Vec<ApiKeyRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM api_keys ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let key_row =
                ApiKeyRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(key_row.into_record()?);
        }

        Ok(records)
    }
}

struct ApiKeyRow {
    id: String,
    name: String,
    user_id: String,
    created_at: String,
    last_used_at: Option<String>,
}

impl ApiKeyRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            last_used_at: row.try_get("last_used_at")?,
        })
    }

    fn into_record(self) -> Result<ApiKeyRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid key id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let last_used_at = self.last_used_at.as_deref().map(parse_datetime).transpose()?;

        Ok(ApiKeyRecord {
            id,
            name: self.name,
            user_id,
            created_at,
            last_used_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}
