//! # Session Commands
//!
//! Admin login state. The flag persists across console invocations until
//! `logout`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;
use kala_db::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub state: SessionState,
    pub authenticated: bool,
}

/// Logs in with the admin credentials.
///
/// ## Returns
/// * `Ok(status)` - Logged in
/// * `Err(UNAUTHORIZED)` - Credentials did not match; state unchanged
pub async fn login(state: &AppState, username: &str, password: &str) -> ApiResult<SessionStatus> {
    debug!(username = %username, "login command");

    let mut session = state.session.lock().await;
    if session.login(username, password).await? {
        Ok(status_of(session.state()))
    } else {
        Err(ApiError::new(ErrorCode::Unauthorized, "Invalid credentials"))
    }
}

pub async fn logout(state: &AppState) -> ApiResult<SessionStatus> {
    let mut session = state.session.lock().await;
    session.logout().await?;
    Ok(status_of(session.state()))
}

pub async fn status(state: &AppState) -> SessionStatus {
    status_of(state.session.lock().await.state())
}

fn status_of(state: SessionState) -> SessionStatus {
    SessionStatus {
        state,
        authenticated: state == SessionState::LoggedIn,
    }
}
