pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::service::PlayerService;
pub use domain::{EmbedRequest, OriginPolicy, PlayerEvent};
