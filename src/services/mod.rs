pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthenticatedUser};
pub use auth_service_impl::SeaOrmAuthService;

pub mod favorites_service;
pub mod favorites_service_impl;
pub use favorites_service::{
    FavoriteItem, FavoritesByCategory, FavoritesError, FavoritesService, NewFavorite,
};
pub use favorites_service_impl::SeaOrmFavoritesService;

/// Whether an error from the persistence layer is a unique-constraint
/// violation, so business code can map it to a conflict instead of a
/// generic storage fault.
pub(crate) fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sea_orm::DbErr>()
        .and_then(sea_orm::DbErr::sql_err)
        .is_some_and(|e| matches!(e, sea_orm::SqlErr::UniqueConstraintViolation(_)))
}
