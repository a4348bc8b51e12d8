pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::ProfileService;
pub use domain::{AvatarStorage, Profile, ProfileRepository, ProfileUpdate, AVATAR_BUCKET};
pub use infrastructure::{InMemoryProfileRepository, ProfileRepositoryImpl, SupabaseAvatarStorage};
