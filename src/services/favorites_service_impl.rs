//! `SeaORM` implementation of the `FavoritesService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::Category;
use crate::services::favorites_service::{
    FavoriteItem, FavoritesByCategory, FavoritesError, FavoritesService, NewFavorite,
};
use crate::services::is_unique_violation;

pub struct SeaOrmFavoritesService {
    store: Store,
}

impl SeaOrmFavoritesService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoritesService for SeaOrmFavoritesService {
    async fn add(&self, user_id: i32, fav: NewFavorite) -> Result<(), FavoritesError> {
        match self.store.add_favorite(user_id, &fav).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(FavoritesError::Conflict(
                "Item is already in favorites".to_string(),
            )),
            Err(e) => Err(FavoritesError::Database(e.to_string())),
        }
    }

    async fn list(&self, user_id: i32) -> Result<FavoritesByCategory, FavoritesError> {
        let rows = self.store.list_favorites(user_id).await?;

        let mut grouped = FavoritesByCategory::default();

        for row in rows {
            // Unknown categories are dropped rather than surfaced.
            let Some(category) = Category::parse(&row.category) else {
                continue;
            };

            let item = FavoriteItem::from(row);
            match category {
                Category::Movie => grouped.movies.push(item),
                Category::Series => grouped.series.push(item),
                Category::Anime => grouped.animes.push(item),
            }
        }

        Ok(grouped)
    }

    async fn remove(&self, user_id: i32, item_id: i64) -> Result<(), FavoritesError> {
        let removed = self
            .store
            .remove_favorites_for_item(user_id, item_id)
            .await?;

        if removed == 0 {
            return Err(FavoritesError::NotFound("Favorite not found".to_string()));
        }

        Ok(())
    }

    async fn check(&self, user_id: i32, category: &str, item_id: i64) -> Option<i32> {
        match self.store.find_favorite(user_id, item_id, category).await {
            Ok(fav_id) => fav_id,
            Err(e) => {
                tracing::warn!("Favorite check failed for user {user_id}: {e}");
                None
            }
        }
    }
}
