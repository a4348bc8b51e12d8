pub mod client;
pub mod entities;
pub mod messages;

pub use client::AuthClient;
pub use entities::{registration_key, AuthSession, AuthUser, SignUpRequest};
pub use messages::translate_auth_error;
