//! # kala-db: Persistence Layer for Drik Kala
//!
//! Durable storage for the storefront records and the stores built on it.
//! SQLite through sqlx; every record is one JSON document under a fixed key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drik Kala Data Flow                              │
//! │                                                                         │
//! │  Console command (products add, inquiries seen, settings set ...)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kala-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Stores     │    │  Repository   │    │  Database    │  │   │
//! │  │   │  (store/)     │    │  (kv.rs)      │    │  (pool.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SettingsStore │───►│ KvRepository  │───►│ SqlitePool   │  │   │
//! │  │   │ CatalogStore  │    │ get/put/      │    │ migrations   │  │   │
//! │  │   │ InquiryStore  │    │ remove/keys   │    │ 001_kv_store │  │   │
//! │  │   │ AdminSession  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          <platform data dir>/drik-kala.db                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL access (`kv_store`)
//! - [`store`] - Settings, catalog, inquiry and session stores
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kala_db::{CatalogStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("drik-kala.db")).await?;
//! let catalog = CatalogStore::load(db.kv()).await?;
//! let festive = catalog.by_category("Festive Wear");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::kv::KvRepository;
pub use store::catalog::CatalogStore;
pub use store::inquiry::InquiryStore;
pub use store::session::{AdminSession, SessionState};
pub use store::settings::SettingsStore;
