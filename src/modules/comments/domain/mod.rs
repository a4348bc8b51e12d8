pub mod entities;
pub mod repository;

pub use entities::{Comment, CommentAuthor};
pub use repository::CommentRepository;
