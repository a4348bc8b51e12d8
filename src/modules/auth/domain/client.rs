use super::entities::{AuthSession, AuthUser};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Identity provider port.
///
/// Implementations return backend error text untranslated inside
/// `AppError::Unauthorized`; the service localizes it.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Returns a session when the backend signs the user in right away,
    /// `None` when email confirmation is pending
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> AppResult<(AuthUser, Option<AuthSession>)>;

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    async fn sign_out(&self, access_token: &str) -> AppResult<()>;

    async fn current_user(&self, access_token: &str) -> AppResult<Option<AuthUser>>;
}
