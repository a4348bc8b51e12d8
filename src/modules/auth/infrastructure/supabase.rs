//! GoTrue REST implementation of `AuthClient`

use crate::modules::auth::domain::{AuthClient, AuthSession, AuthUser};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::SupabaseClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct UserDto {
    id: Uuid,
    email: Option<String>,
    email_confirmed_at: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<UserDto> for AuthUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            username: dto
                .user_metadata
                .get("username")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            email_confirmed: dto.email_confirmed_at.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    access_token: String,
    refresh_token: String,
    expires_at: Option<i64>,
    user: UserDto,
}

impl From<SessionDto> for AuthSession {
    fn from(dto: SessionDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            expires_at: dto
                .expires_at
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            user: dto.user.into(),
        }
    }
}

/// Sign-up answers with a session when auto-confirm is on, a bare user otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpDto {
    Session(SessionDto),
    User(UserDto),
}

pub struct SupabaseAuthClient {
    client: Arc<SupabaseClient>,
}

impl SupabaseAuthClient {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    async fn failure(response: Response) -> AppError {
        let status = response.status();
        let message = SupabaseClient::error_message(response).await;
        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::UpstreamRateLimited(message),
            s if s.is_server_error() => AppError::ExternalServiceError(message),
            _ => AppError::Unauthorized(message),
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> AppResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            AppError::SerializationError(format!("Unexpected auth response: {}", e))
        })
    }
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> AppResult<(AuthUser, Option<AuthSession>)> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/signup", None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "username": username },
            }));

        let response = self.client.execute(request, "auth/v1/signup").await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(match Self::parse::<SignUpDto>(response).await? {
            SignUpDto::Session(session) => {
                let session = AuthSession::from(session);
                (session.user.clone(), Some(session))
            }
            SignUpDto::User(user) => (user.into(), None),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));

        let response = self.client.execute(request, "auth/v1/token").await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(Self::parse::<SessionDto>(response).await?.into())
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/logout", Some(access_token));

        let response = self.client.execute(request, "auth/v1/logout").await?;
        // an already invalid token means the session is gone anyway
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(Self::failure(response).await)
        }
    }

    async fn current_user(&self, access_token: &str) -> AppResult<Option<AuthUser>> {
        let request = self
            .client
            .request(Method::GET, "auth/v1/user", Some(access_token));

        let response = self.client.execute(request, "auth/v1/user").await?;
        match response.status() {
            s if s.is_success() => Ok(Some(Self::parse::<UserDto>(response).await?.into())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::failure(response).await),
        }
    }
}
