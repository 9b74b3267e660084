//! # Admin Session
//!
//! One persisted boolean gating the admin area.
//!
//! ## State Machine
//! ```text
//!              login(admin_drik, drik@123)
//!   LoggedOut ─────────────────────────────► LoggedIn
//!       ▲                                        │
//!       └──────────────── logout() ──────────────┘
//!
//!   Wrong credentials: stays where it was.
//!   Startup: LoggedIn iff the stored flag reads "true".
//! ```
//!
//! The credential check is a plain local comparison; it keeps the admin
//! pages out of casual reach and nothing more.

use kala_core::{ADMIN_PASSWORD, ADMIN_USERNAME};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ADMIN_AUTH_KEY;
use crate::error::DbResult;
use crate::repository::kv::KvRepository;

const AUTH_FLAG: &str = "true";

/// Session state as seen by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Persisted admin login flag.
#[derive(Debug)]
pub struct AdminSession {
    kv: KvRepository,
    authenticated: bool,
}

impl AdminSession {
    /// Restores the flag. Anything other than `true` counts as logged out.
    pub async fn load(kv: KvRepository) -> DbResult<Self> {
        let authenticated = match kv.get(ADMIN_AUTH_KEY).await? {
            None => false,
            Some(value) if value == AUTH_FLAG => true,
            Some(value) => {
                warn!(value = %value, "Unexpected admin flag value, treating as logged out");
                false
            }
        };
        Ok(AdminSession { kv, authenticated })
    }

    /// Logs in on an exact credential match.
    ///
    /// ## Returns
    /// * `Ok(true)` - Credentials matched; flag set and persisted
    /// * `Ok(false)` - Mismatch; state unchanged
    pub async fn login(&mut self, username: &str, password: &str) -> DbResult<bool> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            warn!(username = %username, "Admin login rejected");
            return Ok(false);
        }

        self.authenticated = true;
        self.kv.put(ADMIN_AUTH_KEY, AUTH_FLAG).await?;
        info!("Admin logged in");
        Ok(true)
    }

    /// Clears the flag and removes it from storage.
    pub async fn logout(&mut self) -> DbResult<()> {
        self.authenticated = false;
        self.kv.remove(ADMIN_AUTH_KEY).await?;
        info!("Admin logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
