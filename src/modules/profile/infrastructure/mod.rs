pub mod memory;
pub mod models;
pub mod repository;
pub mod storage;

pub use memory::InMemoryProfileRepository;
pub use repository::ProfileRepositoryImpl;
pub use storage::SupabaseAvatarStorage;
