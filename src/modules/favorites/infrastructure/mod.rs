pub mod memory;
pub mod models;
pub mod repository;

pub use memory::InMemoryFavoriteRepository;
pub use repository::FavoriteRepositoryImpl;
