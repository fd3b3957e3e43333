use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::SuccessResponse;
use super::{ApiError, AppState, session};
use crate::services::{FavoritesByCategory, NewFavorite};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub item_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct CheckFavoriteResponse {
    pub favorited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_id: Option<i32>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/favorites/add
/// Favorite an item for the logged-in user.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let user = session::current_user(&session).await?;

    let item_id = payload
        .item_id
        .ok_or_else(|| ApiError::validation("item_id is required"))?;

    let fav = NewFavorite {
        item_id,
        title: payload.title.unwrap_or_default(),
        year: payload.year,
        rating: payload.rating,
        image: payload.image,
        category: payload.category.unwrap_or_default(),
    };

    state.favorites_service().add(user.id, fav).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/favorites
/// The logged-in user's favorites, grouped by category, newest first.
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<FavoritesByCategory>, ApiError> {
    let user = session::current_user(&session).await?;

    let grouped = state.favorites_service().list(user.id).await?;

    Ok(Json(grouped))
}

/// DELETE /api/favorites/remove/{item_id}
/// Unfavorite an item across every category it was favorited under.
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(item_id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let user = session::current_user(&session).await?;

    state.favorites_service().remove(user.id, item_id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/favorites/check/{category}/{item_id}
/// Whether the item is favorited under the given category.
///
/// Never errors: an anonymous client or a storage fault both answer
/// "not favorited".
pub async fn check_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((category, item_id)): Path<(String, i64)>,
) -> Json<CheckFavoriteResponse> {
    let Some(user) = session::current_user_opt(&session).await else {
        return Json(CheckFavoriteResponse {
            favorited: false,
            fav_id: None,
        });
    };

    let fav_id = state
        .favorites_service()
        .check(user.id, &category, item_id)
        .await;

    Json(CheckFavoriteResponse {
        favorited: fav_id.is_some(),
        fav_id,
    })
}
