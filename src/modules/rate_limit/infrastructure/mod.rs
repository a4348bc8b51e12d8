pub mod memory;
pub mod models;
pub mod repository;

pub use memory::InMemoryRateLimitRepository;
pub use repository::RateLimitRepositoryImpl;
