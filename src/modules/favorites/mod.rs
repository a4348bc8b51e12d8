pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::FavoritesService;
pub use domain::{Favorite, FavoriteRepository, NewFavorite, WatchStatus};
pub use infrastructure::{FavoriteRepositoryImpl, InMemoryFavoriteRepository};
