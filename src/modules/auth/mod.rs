pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::AuthService;
pub use domain::{translate_auth_error, AuthClient, AuthSession, AuthUser, SignUpRequest};
pub use infrastructure::SupabaseAuthClient;
