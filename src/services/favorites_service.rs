//! Domain service for a user's favorited media items.

use serde::Serialize;
use thiserror::Error;

pub use crate::db::NewFavorite;
use crate::entities::favorites;

/// Errors specific to favorites operations.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for FavoritesError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A single favorite as exposed to clients. The category is implied by the
/// group it is listed under and is not repeated here.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteItem {
    pub id: i32,
    pub item_id: i64,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
}

impl From<favorites::Model> for FavoriteItem {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            title: model.title,
            year: model.year,
            rating: model.rating,
            image: model.image,
        }
    }
}

/// A user's favorites partitioned by category, each group newest first.
#[derive(Debug, Default, Serialize)]
pub struct FavoritesByCategory {
    pub movies: Vec<FavoriteItem>,
    pub series: Vec<FavoriteItem>,
    pub animes: Vec<FavoriteItem>,
}

/// Domain service trait for favorites. All operations are scoped to the
/// already-authenticated user passed in by the transport layer.
#[async_trait::async_trait]
pub trait FavoritesService: Send + Sync {
    /// Adds a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Conflict`] when the item is already
    /// favorited under the same category.
    async fn add(&self, user_id: i32, fav: NewFavorite) -> Result<(), FavoritesError>;

    /// All favorites for the user, grouped by category. Rows whose stored
    /// category is not part of the closed enumeration are dropped.
    async fn list(&self, user_id: i32) -> Result<FavoritesByCategory, FavoritesError>;

    /// Removes the item from the user's favorites across every category.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::NotFound`] when nothing matched.
    async fn remove(&self, user_id: i32, item_id: i64) -> Result<(), FavoritesError>;

    /// Whether the triple is favorited, returning the favorite's id if so.
    ///
    /// Fails open: storage faults are logged and answered as "not
    /// favorited", since this only gates a UI affordance.
    async fn check(&self, user_id: i32, category: &str, item_id: i64) -> Option<i32>;
}
