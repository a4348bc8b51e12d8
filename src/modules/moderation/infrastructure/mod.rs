pub mod memory;
pub mod repository;

pub use memory::InMemoryModeratorRepository;
pub use repository::ModeratorRepositoryImpl;
