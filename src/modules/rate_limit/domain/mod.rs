pub mod action_type;
pub mod entities;
pub mod policy;
pub mod repository;

// Re-exports for easy access
pub use action_type::{ActionType, RateLimitRule, BLOCK_DURATION_SECS};
pub use entities::{RateLimitRecord, RateLimitStatus};
pub use policy::{evaluate, RateLimitDecision};
pub use repository::RateLimitRepository;
