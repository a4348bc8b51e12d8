use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::retry_policy::RetryPolicy;

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the policy runs out of attempts.
pub async fn with_retry<F, Fut, T>(
    operation: F,
    policy: &RetryPolicy,
    operation_name: &str,
) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut last_error = None;

    for attempt in 0..=policy.max_retries {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{} succeeded on attempt {} after {} retries",
                        operation_name,
                        attempt + 1,
                        attempt
                    );
                }
                return Ok(result);
            }
            Err(error) => {
                if !error.is_retryable() {
                    debug!(
                        "{} failed with non-retryable error: {}",
                        operation_name, error
                    );
                    return Err(error);
                }

                if attempt < policy.max_retries {
                    let delay = policy.calculate_delay(attempt, None);
                    warn!(
                        "{} failed on attempt {} ({}), retrying in {:?}",
                        operation_name,
                        attempt + 1,
                        error,
                        delay
                    );
                    sleep(delay).await;
                } else {
                    warn!(
                        "{} failed on final attempt {} ({}), giving up",
                        operation_name,
                        attempt + 1,
                        error
                    );
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| AppError::ExternalServiceError("All retries exhausted".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast(policy: RetryPolicy) -> RetryPolicy {
        policy.with_base_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AppError::ExternalServiceError("flaky".into()))
                } else {
                    Ok(7)
                }
            },
            &fast(RetryPolicy::reads()),
            "flaky read",
        )
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn validation_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::ValidationError("nope".into()))
            },
            &fast(RetryPolicy::reads()),
            "validate",
        )
        .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mutation_policy_makes_two_attempts_at_most() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::ExternalServiceError("down".into()))
            },
            &fast(RetryPolicy::mutations()),
            "write",
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
