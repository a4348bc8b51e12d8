pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::CommentsService;
pub use domain::{Comment, CommentAuthor, CommentRepository};
pub use infrastructure::{CommentRepositoryImpl, InMemoryCommentRepository};
