pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::RatingService;
pub use infrastructure::{InMemoryRatingRepository, RatingRepositoryImpl};
pub use domain::{AnimeRating, Rating, RatingRepository, ScoreCalculator, TopRatedAnime};
