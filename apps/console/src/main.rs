//! # Drik Kala Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        kala-console                                     │
//! │                                                                         │
//! │  main.rs ────► Starts the tokio runtime                                │
//! │                                                                         │
//! │  lib.rs ─────► Config, logging, database, dispatch                     │
//! │                                                                         │
//! │  commands/ ──► products, inquiries, settings, login, order ...         │
//! │                                                                         │
//! │  state/ ─────► AppState (CatalogStore, InquiryStore, SettingsStore,    │
//! │                AdminSession)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//!                ┌──────────────────────────────────────┐
//!                │  drik-kala.db (SQLite, WAL, kv_store) │
//!                └──────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    kala_console::run().await
}
