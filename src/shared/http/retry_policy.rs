//! Retry policies for reads, mutations and catalog reads
//!
//! Reads are idempotent and back off exponentially; mutations are retried
//! at most once.

use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the first try)
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier applied per attempt
    pub backoff_multiplier: f64,
    /// Add up to 10% random jitter
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::reads()
    }
}

impl RetryPolicy {
    /// Idempotent reads: 1s, 2s, 4s ... capped at 30s
    pub fn reads() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    /// Mutations get a single retry
    pub fn mutations() -> Self {
        Self {
            max_retries: 1,
            ..Self::reads()
        }
    }

    /// Catalog reads: read policy plus jitter so parallel pages don't retry
    /// in lockstep
    pub fn catalog() -> Self {
        Self {
            jitter: true,
            ..Self::reads()
        }
    }

    /// No retries at all
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::reads()
        }
    }

    /// Same shape with a shorter base delay (tests, local backends)
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Calculate delay for the retry following `attempt` (0-based)
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let mut delay = Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64)
            .min(self.max_delay);

        if self.jitter {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay = (delay + Duration::from_millis(jitter_ms)).min(self.max_delay);
        }

        delay
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
    /// Total rate limit (from X-RateLimit-Limit header)
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let parse = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
        };

        Self {
            retry_after: parse("retry-after")
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs),
            remaining: parse("x-ratelimit-remaining").and_then(|s| s.parse::<u32>().ok()),
            limit: parse("x-ratelimit-limit").and_then(|s| s.parse::<u32>().ok()),
        }
    }
}

/// Status codes worth another attempt
pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 425 | 429 | 500..=599)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_policy_doubles_from_one_second() {
        let policy = RetryPolicy::reads();
        assert_eq!(policy.calculate_delay(0, None), Duration::from_secs(1));
        assert_eq!(policy.calculate_delay(1, None), Duration::from_secs(2));
        assert_eq!(policy.calculate_delay(2, None), Duration::from_secs(4));
    }

    #[test]
    fn delay_is_capped_at_thirty_seconds() {
        let policy = RetryPolicy::reads();
        assert_eq!(policy.calculate_delay(10, None), Duration::from_secs(30));
        assert_eq!(
            policy.calculate_delay(0, Some(Duration::from_secs(120))),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn mutations_retry_once() {
        assert_eq!(RetryPolicy::mutations().max_retries, 1);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = RetryPolicy::catalog();
        for _ in 0..50 {
            let d = policy.calculate_delay(1, None);
            assert!(d >= Duration::from_secs(2) && d <= Duration::from_millis(2200));
        }
    }

    #[test]
    fn test_rate_limit_info_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "30".parse().unwrap());
        headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
        headers.insert("x-ratelimit-limit", "90".parse().unwrap());

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.retry_after, Some(Duration::from_secs(30)));
        assert_eq!(info.remaining, Some(0));
        assert_eq!(info.limit, Some(90));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(reqwest::StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(reqwest::StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(reqwest::StatusCode::BAD_REQUEST));
    }
}
