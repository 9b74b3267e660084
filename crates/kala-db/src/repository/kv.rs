//! # Key-Value Repository
//!
//! Raw access to the `kv_store` table. Each storefront record is a single
//! JSON document under a fixed string key.
//!
//! ## Table Layout
//! ```text
//! ┌────────────────────────────────┬──────────────────────────┬──────────────────────────┐
//! │ key (PK)                       │ value (JSON text)        │ updated_at (RFC 3339)    │
//! ├────────────────────────────────┼──────────────────────────┼──────────────────────────┤
//! │ drik-kala-website-settings     │ {"brandName": ...}       │ 2024-01-15T10:30:00Z     │
//! │ drik-kala-products             │ [{"id": "1", ...}, ...]  │ ...                      │
//! │ drik-kala-inquiries            │ [...]                    │ ...                      │
//! │ drik-kala-admin-auth           │ true                     │ ...                      │
//! └────────────────────────────────┴──────────────────────────┴──────────────────────────┘
//! ```
//!
//! Writes are upserts, so a key holds exactly one value at a time.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for key-value records.
///
/// ## Usage
/// ```rust,ignore
/// let kv = db.kv();
/// kv.put("drik-kala-admin-auth", "true").await?;
/// assert_eq!(kv.get("drik-kala-admin-auth").await?.as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads the raw value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key is present
    /// * `Ok(None)` - Key was never written or has been removed
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, present = value.is_some(), "Read record");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing record");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes `key`.
    ///
    /// ## Returns
    /// `true` if a row was removed, `false` if the key was absent.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "Removing record");

        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    /// Encodes `value` as JSON and writes it under `key`.
    pub async fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::serialization(key, &e))?;
        self.put(key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
