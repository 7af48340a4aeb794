//! Access guard shared by the form and JSON surfaces.
//!
//! Handlers call [`authorize`] first thing. It authenticates, then checks the
//! role, and returns a tagged [`Access`]; each surface decides how a denial is
//! presented (redirect with notice, or 401/403).

use tower_sessions::Session;
use tracing::warn;

use super::AppState;
use crate::constants::session::USER_KEY;
use crate::models::{AuthenticatedUser, Role};

pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Member];

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No session, or the session's user no longer exists.
    Unauthenticated,
    /// Authenticated, but the role is not permitted.
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allowed(AuthenticatedUser),
    Denied(Denial),
}

impl Access {
    pub fn into_result(self) -> Result<AuthenticatedUser, Denial> {
        match self {
            Self::Allowed(user) => Ok(user),
            Self::Denied(denial) => Err(denial),
        }
    }
}

/// Resolves the session's username against the live users document.
pub async fn current_user(state: &AppState, session: &Session) -> Option<AuthenticatedUser> {
    let username = match session.get::<String>(USER_KEY).await {
        Ok(Some(username)) => username,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to read session");
            return None;
        }
    };

    let user = state.auth().resolve(&username).await;
    if let Some(user) = &user {
        tracing::Span::current().record("user", user.username.as_str());
    }
    user
}

#[must_use]
pub fn check_role(user: AuthenticatedUser, permitted: &[Role]) -> Access {
    if permitted.contains(&user.role) {
        Access::Allowed(user)
    } else {
        Access::Denied(Denial::Forbidden)
    }
}

/// Authenticate, then authorize against `permitted`.
pub async fn authorize(state: &AppState, session: &Session, permitted: &[Role]) -> Access {
    match current_user(state, session).await {
        Some(user) => check_role(user, permitted),
        None => Access::Denied(Denial::Unauthenticated),
    }
}
