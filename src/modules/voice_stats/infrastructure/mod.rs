pub mod memory;
pub mod repository;

pub use memory::InMemoryVoiceSelectionRepository;
pub use repository::VoiceSelectionRepositoryImpl;
