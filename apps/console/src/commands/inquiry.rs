//! # Inquiry Commands
//!
//! Contact form submission (public) and the admin inquiry inbox.
//!
//! ```text
//!   submit ──► validate_new_inquiry ──► InquiryStore::add ──► New
//!   seen   ──► admin ──► InquiryStore::mark_seen           ──► Seen
//!   list   ──► admin ──► InquiryFilter { status?, date? }
//! ```

use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::AppState;
use kala_core::validation::validate_new_inquiry;
use kala_core::{CoreError, Inquiry, InquiryFilter, NewInquiry};

/// Records a contact form submission. No login needed.
pub async fn submit_inquiry(state: &AppState, data: NewInquiry) -> ApiResult<Inquiry> {
    validate_new_inquiry(&data)?;

    let inquiry = state.inquiries.lock().await.add(data).await?;
    info!(id = %inquiry.id, "Inquiry submitted");
    Ok(inquiry)
}

/// Lists inquiries matching `filter`, oldest first.
pub async fn list_inquiries(state: &AppState, filter: &InquiryFilter) -> ApiResult<Vec<Inquiry>> {
    state.require_admin().await?;

    let inquiries = state.inquiries.lock().await;
    let matched: Vec<Inquiry> = inquiries.filtered(filter).into_iter().cloned().collect();
    debug!(
        status = ?filter.status,
        date = ?filter.date_prefix,
        count = matched.len(),
        "list_inquiries command"
    );
    Ok(matched)
}

/// Marks an inquiry as seen. Already seen inquiries are left as they are.
pub async fn mark_inquiry_seen(state: &AppState, id: &str) -> ApiResult<Inquiry> {
    state.require_admin().await?;

    let mut inquiries = state.inquiries.lock().await;
    inquiries.mark_seen(id).await?;
    inquiries
        .by_id(id)
        .cloned()
        .ok_or_else(|| CoreError::InquiryNotFound(id.to_string()).into())
}

pub async fn remove_inquiry(state: &AppState, id: &str) -> ApiResult<()> {
    state.require_admin().await?;

    if state.inquiries.lock().await.remove(id).await? {
        Ok(())
    } else {
        Err(CoreError::InquiryNotFound(id.to_string()).into())
    }
}
