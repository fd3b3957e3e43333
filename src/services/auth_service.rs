//! Domain service for registration and login.
//!
//! Session establishment and teardown live at the transport layer
//! (`api::session`); this service only answers identity questions against
//! the store.

use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// An identity the transport layer may bind a session to.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account and returns the identity to bind the session to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if any field is missing and
    /// [`AuthError::Conflict`] if the username or email is already taken.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// Verifies credentials and returns the identity to bind the session to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any credential failure;
    /// the error does not distinguish an unknown email from a wrong password.
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;
}
