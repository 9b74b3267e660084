//! # Settings Commands
//!
//! Reading is public (every storefront page renders from the settings);
//! changing them needs an admin session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use kala_core::{SettingsPatch, WebsiteSettings};

/// One CSS custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeToken {
    pub name: String,
    pub value: String,
}

pub async fn get_settings(state: &AppState) -> WebsiteSettings {
    state.settings.lock().await.get().clone()
}

/// Merges `patch` over the current settings.
///
/// ## Returns
/// The settings after the merge.
pub async fn update_settings(state: &AppState, patch: SettingsPatch) -> ApiResult<WebsiteSettings> {
    state.require_admin().await?;
    debug!(?patch, "update_settings command");

    let mut settings = state.settings.lock().await;
    Ok(settings.update(patch).await?.clone())
}

/// Discards every customization.
pub async fn reset_settings(state: &AppState) -> ApiResult<WebsiteSettings> {
    state.require_admin().await?;

    let mut settings = state.settings.lock().await;
    Ok(settings.reset_to_defaults().await?.clone())
}

/// CSS custom properties for the current settings, in application order.
pub async fn theme_tokens(state: &AppState) -> Vec<ThemeToken> {
    state
        .settings
        .lock()
        .await
        .theme_tokens()
        .into_iter()
        .map(|(name, value)| ThemeToken {
            name: name.to_string(),
            value,
        })
        .collect()
}
