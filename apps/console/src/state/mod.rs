//! # State Module
//!
//! Owns the four stores for one console invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AppState (built once in run(), passed by & to every command)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌──────────────┬─────────┴────────┬──────────────────┐             │
//! │     ▼              ▼                  ▼                  ▼              │
//! │  ┌────────────┐ ┌────────────┐ ┌──────────────┐ ┌──────────────┐       │
//! │  │ Mutex<     │ │ Mutex<     │ │ Mutex<       │ │ Mutex<       │       │
//! │  │  Catalog>  │ │  Inquiry>  │ │  Settings>   │ │  Session>    │       │
//! │  └────────────┘ └────────────┘ └──────────────┘ └──────────────┘       │
//! │                                                                         │
//! │  ConsoleConfig: read-only after startup, no lock.                      │
//! │  Lock order when a command needs two stores: session, catalog,         │
//! │  inquiries, settings.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kala_core::order::whatsapp_digits;
use kala_core::DEFAULT_WHATSAPP_NUMBER;
use kala_db::{AdminSession, CatalogStore, Database, DbConfig, InquiryStore, SettingsStore};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ConsoleConfig;
use crate::error::{ApiError, ApiResult};

/// Stores plus configuration for the running console.
#[derive(Debug)]
pub struct AppState {
    config: ConsoleConfig,
    db: Database,
    pub catalog: Mutex<CatalogStore>,
    pub inquiries: Mutex<InquiryStore>,
    pub settings: Mutex<SettingsStore>,
    pub session: Mutex<AdminSession>,
}

impl AppState {
    /// Connects to the database and loads every store.
    pub async fn open(config: ConsoleConfig, db_config: DbConfig) -> ApiResult<Self> {
        let db = Database::new(db_config).await?;
        Self::load(config, db).await
    }

    /// Loads every store from an already connected database.
    pub async fn load(config: ConsoleConfig, db: Database) -> ApiResult<Self> {
        let kv = db.kv();

        let catalog = CatalogStore::load(kv.clone()).await?;
        let inquiries = InquiryStore::load(kv.clone()).await?;
        let settings = SettingsStore::load(kv.clone()).await?;
        let session = AdminSession::load(kv).await?;

        info!(
            products = catalog.list().len(),
            inquiries = inquiries.list().len(),
            admin = session.is_authenticated(),
            "Stores loaded"
        );

        Ok(AppState {
            config,
            db,
            catalog: Mutex::new(catalog),
            inquiries: Mutex::new(inquiries),
            settings: Mutex::new(settings),
            session: Mutex::new(session),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Fails with `UNAUTHORIZED` unless an admin is logged in.
    pub async fn require_admin(&self) -> ApiResult<()> {
        if self.session.lock().await.is_authenticated() {
            Ok(())
        } else {
            debug!("Admin command refused, not logged in");
            Err(ApiError::unauthorized())
        }
    }

    /// Order link destination digits.
    ///
    /// ## Resolution Order
    /// 1. `whatsapp_number` from console config / `KALA_WHATSAPP_NUMBER`
    /// 2. Digits of the storefront's WhatsApp number setting
    /// 3. [`DEFAULT_WHATSAPP_NUMBER`]
    pub async fn whatsapp_number(&self) -> String {
        if let Some(number) = &self.config.whatsapp_number {
            return number.clone();
        }

        let digits = whatsapp_digits(&self.settings.lock().await.get().whatsapp_number);
        if digits.is_empty() {
            DEFAULT_WHATSAPP_NUMBER.to_string()
        } else {
            digits
        }
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
