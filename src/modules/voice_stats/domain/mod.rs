pub mod entities;
pub mod repository;
pub mod stats;

pub use entities::VoiceSelection;
pub use repository::VoiceSelectionRepository;
pub use stats::{tally, VoiceStat, VoiceStats};
