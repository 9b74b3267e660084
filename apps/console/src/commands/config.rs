//! # Config Commands
//!
//! The console configuration in effect and a health summary.

use serde::Serialize;
use tracing::debug;

use crate::commands::session::{self, SessionStatus};
use crate::config::ConsoleConfig;
use crate::error::ApiResult;
use crate::state::AppState;
use kala_db::MigrationStatus;

/// Session, database health and the records currently stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleStatus {
    pub session: SessionStatus,
    pub database_ok: bool,
    pub migrations: MigrationStatus,
    pub records: Vec<String>,
}

/// Gets the configuration after file and environment overrides.
///
/// ## When Used
/// - Checking which database file a command will touch
/// - Confirming a `KALA_*` override took effect
pub fn get_config(state: &AppState) -> ConsoleConfig {
    debug!("get_config command");
    state.config().clone()
}

pub async fn console_status(state: &AppState) -> ApiResult<ConsoleStatus> {
    Ok(ConsoleStatus {
        session: session::status(state).await,
        database_ok: state.db().health_check().await,
        migrations: state.db().migration_status().await?,
        records: state.db().kv().keys().await?,
    })
}
