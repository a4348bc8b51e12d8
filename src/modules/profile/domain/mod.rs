pub mod entities;
pub mod repository;
pub mod storage;

pub use entities::{Profile, ProfileUpdate};
pub use repository::ProfileRepository;
pub use storage::{avatar_path, AvatarStorage, AVATAR_BUCKET};
