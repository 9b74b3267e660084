//! # Stores
//!
//! In-memory stores over the persisted storefront records. Each store loads
//! its record once and writes it back through [`KvRepository`] on every
//! mutation before returning.
//!
//! ## Store Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  XxxStore::load(kv)                                                    │
//! │       │                                                                 │
//! │       ├── key absent   ──► start from default (seed / empty / false)   │
//! │       ├── key corrupt  ──► copy to <key>.corrupt, start from default   │
//! │       ├── bad elements ──► copy to <key>.corrupt, keep the rest        │
//! │       └── key present  ──► decode                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reads:     served from memory                                         │
//! │  mutations: change memory, then one kv write, then return              │
//! │  no-ops:    (unknown id, empty patch) no write                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write is returned as `DbError`. The in-memory change stays, so
//! the next successful write persists it.

pub mod catalog;
pub mod inquiry;
pub mod session;
pub mod settings;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

// =============================================================================
// Storage Keys
// =============================================================================

/// Website settings record (JSON object).
pub const SETTINGS_KEY: &str = "drik-kala-website-settings";

/// Product catalog (JSON array).
pub const PRODUCTS_KEY: &str = "drik-kala-products";

/// Customer inquiries (JSON array).
pub const INQUIRIES_KEY: &str = "drik-kala-inquiries";

/// Admin session flag (`true`, absent when logged out).
pub const ADMIN_AUTH_KEY: &str = "drik-kala-admin-auth";

// =============================================================================
// Helpers
// =============================================================================

/// Helper to generate a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Draws ids until one is not already taken.
pub(crate) fn generate_unique_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_id();
        if !taken(&id) {
            return id;
        }
    }
}

/// Key holding the last undecodable value stored under `key`.
pub fn backup_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

/// Keeps a copy of `raw` before the store overwrites it.
async fn back_up(kv: &KvRepository, key: &str, raw: &str) -> DbResult<()> {
    let backup = backup_key(key);
    warn!(key = %key, backup = %backup, "Keeping a copy of the undecodable record");
    kv.put(&backup, raw).await
}

/// Loads a JSON record, recovering from a corrupt value.
///
/// Absent and undecodable values both yield `fallback()`; the undecodable
/// value is copied to [`backup_key`] first. Storage errors still propagate.
pub(crate) async fn load_record<T, F>(kv: &KvRepository, key: &str, fallback: F) -> DbResult<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(raw) = kv.get(key).await? else {
        return Ok(fallback());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Stored record is corrupt, using defaults");
            back_up(kv, key, &raw).await?;
            Ok(fallback())
        }
    }
}

/// Loads a JSON array element by element.
///
/// Elements that fail to decode are skipped and the rest kept. A value that
/// is not an array at all yields `fallback()`. Either way the original value
/// is copied to [`backup_key`].
pub(crate) async fn load_collection<T, F>(
    kv: &KvRepository,
    key: &str,
    fallback: F,
) -> DbResult<Vec<T>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let Some(raw) = kv.get(key).await? else {
        return Ok(fallback());
    };

    let elements: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(elements) => elements,
        Err(e) => {
            warn!(key = %key, error = %e, "Stored collection is corrupt, using defaults");
            back_up(kv, key, &raw).await?;
            return Ok(fallback());
        }
    };

    let total = elements.len();
    let mut items = Vec::with_capacity(total);
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value(element) {
            Ok(item) => items.push(item),
            Err(e) => warn!(key = %key, index, error = %e, "Skipping undecodable element"),
        }
    }

    if items.len() < total {
        back_up(kv, key, &raw).await?;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_collection_skips_bad_elements_and_keeps_a_copy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();
        let raw = r#"[1, "two", 3]"#;
        kv.put("numbers", raw).await.unwrap();

        let numbers: Vec<i64> = load_collection(&kv, "numbers", Vec::new).await.unwrap();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(kv.get(&backup_key("numbers")).await.unwrap().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn test_clean_collection_writes_no_copy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();
        kv.put("numbers", "[1, 2]").await.unwrap();

        let numbers: Vec<i64> = load_collection(&kv, "numbers", Vec::new).await.unwrap();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(kv.get(&backup_key("numbers")).await.unwrap(), None);
    }

    #[test]
    fn test_generate_unique_id_skips_taken() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = generate_unique_id(|candidate| seen.contains(candidate));
            assert!(seen.insert(id));
        }
    }
}
