//! Session identity helpers.
//!
//! All knowledge of the cookie/session transport is confined here: handlers
//! establish, clear, and read the current identity through these functions
//! and never touch `tower_sessions` keys directly.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::ApiError;

const SESSION_USER_KEY: &str = "user";

/// Identity stored in the session record at login/registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<crate::services::AuthenticatedUser> for SessionUser {
    fn from(user: crate::services::AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Bind the session to an authenticated identity.
pub async fn establish(session: &Session, user: SessionUser) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

/// Drop the session unconditionally. Idempotent.
pub async fn clear(session: &Session) {
    let _ = session.flush().await;
}

/// Identity bound to the session, if any.
pub async fn current_user_opt(session: &Session) -> Option<SessionUser> {
    session.get::<SessionUser>(SESSION_USER_KEY).await.ok()?
}

/// Identity bound to the session, or an unauthorized error.
pub async fn current_user(session: &Session) -> Result<SessionUser, ApiError> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("You must be logged in".to_string()))
}
