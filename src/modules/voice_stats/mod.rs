pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::service::VoiceStatsService;
pub use domain::{VoiceSelection, VoiceSelectionRepository, VoiceStat, VoiceStats};
pub use infrastructure::{InMemoryVoiceSelectionRepository, VoiceSelectionRepositoryImpl};
