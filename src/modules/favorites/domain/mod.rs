pub mod entities;
pub mod repository;
pub mod watch_status;

pub use entities::{Favorite, NewFavorite};
pub use repository::FavoriteRepository;
pub use watch_status::WatchStatus;
