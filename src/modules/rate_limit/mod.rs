pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::RateLimiter;
pub use infrastructure::{InMemoryRateLimitRepository, RateLimitRepositoryImpl};
pub use domain::{ActionType, RateLimitRecord, RateLimitRepository, RateLimitRule, RateLimitStatus};
