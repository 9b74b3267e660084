//! # Review Commands
//!
//! Admin review listing across the whole catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use kala_core::Review;

/// A review with the product it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub product_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub review: Review,
}

/// Every review, grouped by product in catalog order.
pub async fn list_reviews(state: &AppState) -> ApiResult<Vec<ReviewEntry>> {
    state.require_admin().await?;

    let catalog = state.catalog.lock().await;
    let entries: Vec<ReviewEntry> = catalog
        .reviews()
        .into_iter()
        .map(|(product, review)| ReviewEntry {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            review: review.clone(),
        })
        .collect();

    debug!(count = entries.len(), "list_reviews command");
    Ok(entries)
}
