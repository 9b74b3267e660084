//! # Settings Store
//!
//! The single [`WebsiteSettings`] record. Loads as defaults overlaid with
//! whatever fields were persisted.

use kala_core::{SettingsPatch, WebsiteSettings};
use tracing::{debug, info};

use super::{load_record, SETTINGS_KEY};
use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Site-wide settings with write-through persistence.
#[derive(Debug)]
pub struct SettingsStore {
    kv: KvRepository,
    settings: WebsiteSettings,
}

impl SettingsStore {
    /// Restores the settings record. Never fails on bad data, only on
    /// storage errors.
    pub async fn load(kv: KvRepository) -> DbResult<Self> {
        let settings = load_record(&kv, SETTINGS_KEY, WebsiteSettings::default).await?;
        debug!(brand = %settings.brand_name, "Settings loaded");
        Ok(SettingsStore { kv, settings })
    }

    /// Current settings.
    pub fn get(&self) -> &WebsiteSettings {
        &self.settings
    }

    /// Merges `patch` into the current record and persists it.
    ///
    /// An empty patch changes nothing and skips the write.
    pub async fn update(&mut self, patch: SettingsPatch) -> DbResult<&WebsiteSettings> {
        if patch.is_empty() {
            debug!("Empty settings patch, nothing to do");
            return Ok(&self.settings);
        }

        patch.apply_to(&mut self.settings);
        info!("Updating website settings");
        self.kv.put_json(SETTINGS_KEY, &self.settings).await?;
        Ok(&self.settings)
    }

    /// Restores every default, business hours included, and persists.
    pub async fn reset_to_defaults(&mut self) -> DbResult<&WebsiteSettings> {
        info!("Resetting website settings to defaults");
        self.settings = WebsiteSettings::default();
        self.kv.put_json(SETTINGS_KEY, &self.settings).await?;
        Ok(&self.settings)
    }

    /// CSS custom properties for the current settings.
    pub fn theme_tokens(&self) -> Vec<(&'static str, String)> {
        self.settings.theme_tokens()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use kala_core::BusinessHours;

    async fn store() -> (Database, SettingsStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SettingsStore::load(db.kv()).await.unwrap();
        (db, store)
    }

    #[tokio::test]
    async fn test_fresh_store_has_defaults() {
        let (_db, store) = store().await;
        assert_eq!(store.get(), &WebsiteSettings::default());
    }

    #[tokio::test]
    async fn test_update_changes_only_named_field_and_persists() {
        let (db, mut store) = store().await;

        let patch: SettingsPatch = serde_json::from_str(r##"{"accentColor": "#fff"}"##).unwrap();
        store.update(patch).await.unwrap();

        let expected = WebsiteSettings {
            accent_color: "#fff".to_string(),
            ..WebsiteSettings::default()
        };
        assert_eq!(store.get(), &expected);

        let reloaded = SettingsStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.get(), &expected);
    }

    #[tokio::test]
    async fn test_empty_patch_skips_write() {
        let (db, mut store) = store().await;
        store.update(SettingsPatch::default()).await.unwrap();
        assert_eq!(db.kv().get(SETTINGS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reset_restores_business_hours() {
        let (db, mut store) = store().await;

        let patch = SettingsPatch {
            brand_name: Some("Drik".to_string()),
            business_hours: Some(BusinessHours {
                sunday: "Closed".to_string(),
                ..BusinessHours::default()
            }),
            ..Default::default()
        };
        store.update(patch).await.unwrap();
        assert_eq!(store.get().business_hours.sunday, "Closed");

        store.reset_to_defaults().await.unwrap();
        assert_eq!(store.get(), &WebsiteSettings::default());

        let reloaded = SettingsStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.get(), &WebsiteSettings::default());
    }

    #[tokio::test]
    async fn test_partial_persisted_record_merges_over_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv()
            .put(SETTINGS_KEY, r#"{"brandName": "Drik Studio"}"#)
            .await
            .unwrap();

        let store = SettingsStore::load(db.kv()).await.unwrap();
        assert_eq!(store.get().brand_name, "Drik Studio");
        assert_eq!(store.get().brand_tagline, "by Drishti");
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_to_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(SETTINGS_KEY, "not json at all").await.unwrap();

        let store = SettingsStore::load(db.kv()).await.unwrap();
        assert_eq!(store.get(), &WebsiteSettings::default());
    }

    #[tokio::test]
    async fn test_theme_tokens_follow_updates() {
        let (_db, mut store) = store().await;
        store
            .update(SettingsPatch {
                max_width: Some("960px".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let tokens = store.theme_tokens();
        assert!(tokens.contains(&("--max-width", "960px".to_string())));
    }
}
