//! File-backed implementation of the `AuthService` trait.

use crate::db::Store;
use crate::models::AuthenticatedUser;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct FileAuthService {
    store: Store,
}

impl FileAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for FileAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let username = username.trim();
        let password = password.trim();

        let users = self.store.users().await;
        let record = users.get(username).ok_or(AuthError::InvalidCredentials)?;

        if record.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthenticatedUser::from_record(username, record))
    }

    async fn resolve(&self, username: &str) -> Option<AuthenticatedUser> {
        let users = self.store.users().await;
        users
            .get(username)
            .map(|record| AuthenticatedUser::from_record(username, record))
    }
}
