//! HTTP client with client-side request pacing and retry logic
//!
//! Shared by every outbound REST integration so that each one gets the same
//! quota handling, Retry-After support and error mapping.

use super::retry_policy::{is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter as GovernorRateLimiter,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// HTTP client that paces requests and retries transient failures
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectLimiter,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the Shikimori API (5 rps burst, 90 rpm sustained).
    /// Paces only; backoff belongs to the catalog service above it.
    pub fn for_shikimori(user_agent: &str) -> AppResult<Self> {
        Self::new(
            "Shikimori",
            RetryPolicy::none(),
            Self::create_rate_limiter(90, 5),
            user_agent,
        )
    }

    /// Create a rate limiter with the given per-minute quota and burst capacity
    fn create_rate_limiter(requests_per_minute: u32, burst_size: u32) -> DirectLimiter {
        let per_minute = NonZeroU32::new(requests_per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        GovernorRateLimiter::direct(Quota::per_minute(per_minute).allow_burst(burst))
    }

    pub fn new(
        provider_name: &str,
        retry_policy: RetryPolicy,
        rate_limiter: DirectLimiter,
        user_agent: &str,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter,
            retry_policy,
            provider_name: provider_name.to_string(),
        })
    }

    /// Client with a custom per-minute quota (tests and self-hosted mirrors)
    pub fn with_quota(
        provider_name: &str,
        retry_policy: RetryPolicy,
        requests_per_minute: u32,
        burst_size: u32,
        user_agent: &str,
    ) -> AppResult<Self> {
        Self::new(
            provider_name,
            retry_policy,
            Self::create_rate_limiter(requests_per_minute, burst_size),
            user_agent,
        )
    }

    /// GET a JSON document; any non-success status is an error
    pub async fn get<T, Q>(&self, url: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        match self.get_optional(url, query).await? {
            Some(value) => Ok(value),
            None => Err(AppError::NotFound(format!(
                "{} resource not found: {}",
                self.provider_name, url
            ))),
        }
    }

    /// GET a JSON document, mapping 404 to `None`
    pub async fn get_optional<T, Q>(&self, url: &str, query: &Q) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let max_attempts = self.retry_policy.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..max_attempts {
            self.rate_limiter.until_ready().await;

            let started = Instant::now();
            LogContext::api_call(&self.provider_name, url, "start", None);

            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();
                    LogContext::api_call(
                        &self.provider_name,
                        url,
                        status.as_str(),
                        Some(started.elapsed().as_millis() as u64),
                    );

                    if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    if status.is_success() {
                        return self.parse_response(response).await.map(Some);
                    }

                    let info = RateLimitInfo::from_headers(response.headers());
                    let error = self.status_error(status);

                    if is_retryable_status(status) && attempt + 1 < max_attempts {
                        let delay = self.retry_policy.calculate_delay(attempt, info.retry_after);
                        tracing::warn!(
                            "{} returned {} (attempt {}/{}). Waiting {:?} before retry.",
                            self.provider_name,
                            status,
                            attempt + 1,
                            max_attempts,
                            delay
                        );
                        sleep(delay).await;
                        last_error = Some(error);
                        continue;
                    }

                    return Err(error);
                }
                Err(e) => {
                    let retryable = e.is_timeout() || e.is_connect();
                    let error = AppError::from(e);

                    if retryable && attempt + 1 < max_attempts {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        tracing::warn!(
                            "{} request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            max_attempts,
                            error,
                            delay
                        );
                        sleep(delay).await;
                        last_error = Some(error);
                        continue;
                    }

                    return Err(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::ExternalServiceError(format!(
                "{} request failed after {} attempts",
                self.provider_name, max_attempts
            ))
        }))
    }

    fn status_error(&self, status: StatusCode) -> AppError {
        AppError::from_status(
            status.as_u16(),
            format!("{} API returned {}", self.provider_name, status),
        )
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                response_text.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Check if a request can be made now without waiting
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}
