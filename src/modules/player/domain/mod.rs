pub mod embed;
pub mod events;
pub mod origin;

pub use embed::{EmbedRequest, DEFAULT_PLAYER_HOST};
pub use events::{parse_player_message, PlayerEvent};
pub use origin::OriginPolicy;
