pub mod memory;
pub mod models;
pub mod repository;

pub use memory::InMemoryRatingRepository;
pub use repository::RatingRepositoryImpl;
