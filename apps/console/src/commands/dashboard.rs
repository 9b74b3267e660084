//! # Dashboard Command
//!
//! The admin dashboard summary cards.

use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use kala_core::DashboardStats;

/// Counts for the four summary cards.
pub async fn dashboard(state: &AppState) -> ApiResult<DashboardStats> {
    state.require_admin().await?;

    // Lock order: catalog before inquiries.
    let catalog = state.catalog.lock().await;
    let inquiries = state.inquiries.lock().await;

    let stats = DashboardStats::compute(catalog.list(), inquiries.new_count());

    debug!(?stats, "dashboard command");
    Ok(stats)
}
