pub mod memory;
pub mod models;
pub mod repository;

pub use memory::InMemoryCommentRepository;
pub use repository::CommentRepositoryImpl;
