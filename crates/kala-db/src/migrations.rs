//! # Schema Migrations
//!
//! The schema is one table, `kv_store`. Migrations are embedded at compile
//! time and applied by [`crate::Database::new`].
//!
//! ```text
//!  Database::new
//!       │
//!       ▼
//!  _sqlx_migrations ── compare ──► embedded files
//!                                   └── 001_kv_store.sql (run once, recorded)
//! ```
//!
//! New files go in `migrations/sqlite/` as `NNN_description.sql`. Applied
//! files are never edited.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded versus applied migration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub embedded: usize,
    pub applied: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }
}

/// Applies pending migrations. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying pending migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// Reads how many migrations have been applied.
///
/// A database that was never migrated has no bookkeeping table and reports
/// zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let has_table: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if has_table > 0 {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    } else {
        0
    };

    Ok(MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied).unwrap_or(0),
    })
}
