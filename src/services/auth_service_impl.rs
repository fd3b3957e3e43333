//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, AuthenticatedUser};
use crate::services::is_unique_violation;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }

        // No pre-check: the unique constraints decide, which also settles
        // two concurrent registrations racing on the same name.
        let user = match self.store.create_user(username, email, password).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(AuthError::Conflict(
                    "Username or email already registered".to_string(),
                ));
            }
            Err(e) => return Err(AuthError::Database(e.to_string())),
        };

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let is_valid = self.store.verify_user_password(email, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}
