pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::ModerationService;
pub use domain::{Moderator, ModeratorRepository, ModeratorRole};
pub use infrastructure::{InMemoryModeratorRepository, ModeratorRepositoryImpl};
