use crate::modules::auth::domain::{
    registration_key, translate_auth_error, AuthClient, AuthSession, AuthUser, SignUpRequest,
};
use crate::modules::profile::ProfileService;
use crate::modules::rate_limit::{ActionType, RateLimiter};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_info, log_warn};
use std::sync::Arc;

/// Backend auth errors reach users in Russian
fn localize(error: AppError) -> AppError {
    match error {
        AppError::Unauthorized(message) => AppError::Unauthorized(translate_auth_error(&message)),
        AppError::UpstreamRateLimited(_) => {
            AppError::Unauthorized(translate_auth_error("too many requests"))
        }
        other => other,
    }
}

pub struct AuthService {
    client: Arc<dyn AuthClient>,
    rate_limiter: Arc<RateLimiter>,
    profiles: Arc<ProfileService>,
}

impl AuthService {
    pub fn new(
        client: Arc<dyn AuthClient>,
        rate_limiter: Arc<RateLimiter>,
        profiles: Arc<ProfileService>,
    ) -> Self {
        Self {
            client,
            rate_limiter,
            profiles,
        }
    }

    /// Registers an account and its profile. Attempts are limited per email.
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<(AuthUser, Option<AuthSession>)> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim();
        Validator::validate_email(&email)?;
        Validator::validate_password(&request.password)?;
        Validator::validate_username(username)?;

        self.rate_limiter
            .check_rate_limit(&registration_key(&email), ActionType::Registration)
            .await?;

        let (user, session) = self
            .client
            .sign_up(&email, &request.password, username)
            .await
            .map_err(localize)?;

        // the account exists at this point; a missing profile is recreated on demand
        if let Err(e) = self
            .profiles
            .ensure_profile(&user.id, username, Some(&email))
            .await
        {
            log_warn!("Profile creation for {} failed: {}", user.id, e);
        }

        log_info!("Registered user {}", user.id);
        Ok((user, session))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Введите email и пароль".to_string(),
            ));
        }

        let session = self
            .client
            .sign_in(&email, password)
            .await
            .map_err(localize)?;
        log_info!("User {} signed in", session.user.id);
        Ok(session)
    }

    pub async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        self.client.sign_out(access_token).await.map_err(localize)
    }

    /// `None` for expired or unknown tokens
    pub async fn current_user(&self, access_token: &str) -> AppResult<Option<AuthUser>> {
        if access_token.trim().is_empty() {
            return Ok(None);
        }
        self.client
            .current_user(access_token)
            .await
            .map_err(localize)
    }
}
