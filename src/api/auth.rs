use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, session};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public user summary. Never carries the password hash.
#[derive(Serialize)]
pub struct UserDto {
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserDto,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
/// Create an account and log the new user in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = state
        .auth_service()
        .register(&username, &email, &password)
        .await?;

    session::establish(&session, user.clone().into()).await?;

    tracing::info!("New user registered: {}", user.username);

    Ok(Json(AuthResponse {
        success: true,
        user: UserDto {
            username: user.username,
            email: user.email,
        },
    }))
}

/// POST /api/login
/// Authenticate with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = state.auth_service().login(&email, &password).await?;

    session::establish(&session, user.clone().into()).await?;

    Ok(Json(AuthResponse {
        success: true,
        user: UserDto {
            username: user.username,
            email: user.email,
        },
    }))
}

/// POST /api/logout
/// Invalidate the current session. Always succeeds.
pub async fn logout(session: Session) -> Json<SuccessResponse> {
    session::clear(&session).await;
    Json(SuccessResponse { success: true })
}

/// GET /api/check-auth
/// Whether the client holds an authenticated session.
pub async fn check_auth(session: Session) -> impl IntoResponse {
    match session::current_user_opt(&session).await {
        Some(user) => (
            StatusCode::OK,
            Json(CheckAuthResponse {
                authenticated: true,
                username: Some(user.username),
                email: Some(user.email),
            }),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(CheckAuthResponse {
                authenticated: false,
                username: None,
                email: None,
            }),
        ),
    }
}
