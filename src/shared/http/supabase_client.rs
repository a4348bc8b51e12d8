//! Thin REST client for the Supabase backend (GoTrue auth and Storage)

use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Error body shapes returned by GoTrue and Storage
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with the project key; the user's token authorizes it when
    /// given, otherwise the anon key does
    pub fn request(&self, method: Method, path: &str, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Sends the request, logging timing; HTTP error statuses are returned
    /// as responses for the caller to interpret
    pub async fn execute(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        let started = Instant::now();
        let response = request.send().await?;
        LogContext::api_call(
            "Supabase",
            endpoint,
            response.status().as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        Ok(response)
    }

    /// Best-effort extraction of the backend's error message
    pub async fn error_message(response: Response) -> String {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status.to_string()
                } else {
                    text
                }
            })
    }
}
