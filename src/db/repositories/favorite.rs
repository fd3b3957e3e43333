use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::favorites;

/// Row-shaped input for inserting a favorite. Display metadata is
/// caller-supplied and stored verbatim.
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub item_id: i64,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
    pub category: String,
}

/// Repository for favorite operations, always scoped to a single user.
pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a favorite for `user_id`.
    ///
    /// The unique index on (`user_id`, `item_id`, `category`) is left to the
    /// database; a violation surfaces as the underlying `DbErr` so callers
    /// can map it to a conflict.
    pub async fn add(&self, user_id: i32, fav: &NewFavorite) -> Result<i32> {
        let active = favorites::ActiveModel {
            user_id: Set(user_id),
            item_id: Set(fav.item_id),
            title: Set(fav.title.clone()),
            year: Set(fav.year.clone()),
            rating: Set(fav.rating.clone()),
            image: Set(fav.image.clone()),
            category: Set(fav.category.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(model.id)
    }

    /// All favorites for a user, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<favorites::Model>> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_desc(favorites::Column::CreatedAt)
            .order_by_desc(favorites::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        Ok(rows)
    }

    /// Delete every favorite matching (`user_id`, `item_id`), regardless of
    /// category. Returns the number of rows removed.
    pub async fn remove_by_item(&self, user_id: i32, item_id: i64) -> Result<u64> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::ItemId.eq(item_id))
            .exec(&self.conn)
            .await
            .context("Failed to remove favorite")?;

        Ok(result.rows_affected)
    }

    /// Look up the id of the favorite matching the full triple, if any.
    pub async fn find(&self, user_id: i32, item_id: i64, category: &str) -> Result<Option<i32>> {
        let row = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::ItemId.eq(item_id))
            .filter(favorites::Column::Category.eq(category))
            .one(&self.conn)
            .await
            .context("Failed to check favorite")?;

        Ok(row.map(|f| f.id))
    }
}
