// Bounded contexts

pub mod auth;
pub mod catalog;
pub mod comments;
pub mod favorites;
pub mod moderation;
pub mod player;
pub mod profile;
pub mod rate_limit;
pub mod rating;
pub mod voice_stats;
