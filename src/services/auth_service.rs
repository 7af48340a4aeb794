//! Domain service for authentication and identity resolution.
//!
//! Credentials are compared against the live users document; identities are
//! re-resolved on every request so role or name changes apply without a new login.

use thiserror::Error;

use crate::models::AuthenticatedUser;

/// Errors specific to authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the resolved user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or a wrong password.
    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Looks up `username` in the users document. `None` if it is no longer present.
    async fn resolve(&self, username: &str) -> Option<AuthenticatedUser>;
}
