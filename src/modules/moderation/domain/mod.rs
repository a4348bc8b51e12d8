pub mod entities;
pub mod repository;

pub use entities::{Moderator, ModeratorRole};
pub use repository::ModeratorRepository;
