pub mod entities;
pub mod repository;
pub mod score_calculator;

// Re-exports for easy access
pub use entities::{AnimeRating, Rating, TopRatedAnime};
pub use repository::RatingRepository;
pub use score_calculator::{ScoreCalculator, DEFAULT_GLOBAL_AVERAGE, MIN_VOTES};
