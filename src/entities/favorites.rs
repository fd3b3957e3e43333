use sea_orm::entity::prelude::*;

/// A favorited media item. The (`user_id`, `item_id`, `category`) triple is
/// kept unique by an index created in the initial migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    /// External catalog id of the media item, caller-supplied.
    pub item_id: i64,

    pub title: String,

    pub year: Option<String>,

    pub rating: Option<String>,

    pub image: Option<String>,

    /// Stored verbatim; the closed enumeration is enforced at read time.
    pub category: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
