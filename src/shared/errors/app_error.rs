use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failure, message is already user-facing (localized)
    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// Raised by the per-user action limiter; never retried
    #[error("{message}")]
    RateLimitExceeded {
        message: String,
        retry_after_minutes: i64,
    },

    /// Upstream service answered 429
    #[error("Upstream rate limit: {0}")]
    UpstreamRateLimited(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                AppError::NotFound("Row not found".to_string())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::ServiceUnavailable(format!("Database pool error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Blocking task failed: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Upstream request timed out".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Upstream unreachable".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                404 => AppError::NotFound("External resource not found".to_string()),
                401 | 403 => {
                    AppError::Unauthorized("Not authorized to access external service".to_string())
                }
                code => AppError::from_status(code, format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl AppError {
    /// Builds the limiter rejection with the user-facing wait message
    pub fn rate_limited(action: &str, retry_after_minutes: i64) -> Self {
        let minutes = retry_after_minutes.max(1);
        AppError::RateLimitExceeded {
            message: format!(
                "Too many {} attempts. Please try again in {} minute{}",
                action,
                minutes,
                if minutes == 1 { "" } else { "s" }
            ),
            retry_after_minutes: minutes,
        }
    }

    /// Maps an upstream status to its error class. Transient statuses land
    /// in retryable variants; every other code becomes `ApiError`.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => AppError::UpstreamRateLimited(message),
            401 | 403 => AppError::Unauthorized(message),
            408 | 425 | 500..=599 => AppError::ExternalServiceError(message),
            _ => AppError::ApiError(message),
        }
    }

    /// Network and transient upstream failures are retryable; validation,
    /// auth, limiter rejections, not-found and other 4xx answers are
    /// surfaced immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::ExternalServiceError(_)
                | AppError::UpstreamRateLimited(_)
                | AppError::ServiceUnavailable(_)
        )
    }

    pub fn retry_after_minutes(&self) -> Option<i64> {
        match self {
            AppError::RateLimitExceeded {
                retry_after_minutes,
                ..
            } => Some(*retry_after_minutes),
            _ => None,
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_carries_minutes() {
        let err = AppError::rate_limited("comment", 42);
        assert_eq!(err.retry_after_minutes(), Some(42));
        assert!(err.to_string().contains("42 minutes"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn rate_limited_never_reports_zero_minutes() {
        let err = AppError::rate_limited("rating", 0);
        assert_eq!(err.retry_after_minutes(), Some(1));
        assert!(err.to_string().ends_with("1 minute"));
    }

    #[test]
    fn retryable_classification() {
        assert!(AppError::ExternalServiceError("timeout".into()).is_retryable());
        assert!(AppError::UpstreamRateLimited("429".into()).is_retryable());
        assert!(!AppError::ValidationError("bad".into()).is_retryable());
        assert!(!AppError::NotFound("x".into()).is_retryable());
        assert!(!AppError::ApiError("HTTP 400 Bad Request".into()).is_retryable());
    }

    #[test]
    fn status_decides_retryability() {
        for code in [408, 425, 429, 500, 502, 503, 504] {
            assert!(
                AppError::from_status(code, format!("HTTP {}", code)).is_retryable(),
                "{} should be retried",
                code
            );
        }
        for code in [400, 401, 403, 409, 410, 422] {
            assert!(
                !AppError::from_status(code, format!("HTTP {}", code)).is_retryable(),
                "{} should not be retried",
                code
            );
        }
    }

    #[test]
    fn message_text_does_not_make_errors_retryable() {
        assert!(!AppError::ApiError("HTTP 409 Conflict".into()).is_retryable());
        assert!(!AppError::ApiError("HTTP 422 Unprocessable Entity".into()).is_retryable());
        assert!(!AppError::DatabaseError("connection pool mentioned".into()).is_retryable());
    }
}
