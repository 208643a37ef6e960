use std::future::Future;
use std::time::Duration as StdDuration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// Fixed attempt count with a delay that doubles after every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub initial_delay: StdDuration,
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, initial_delay: StdDuration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Delay slept before `attempt` (1-based); the first attempt runs immediately.
    pub fn delay_before(&self, attempt: u32) -> StdDuration {
        if attempt <= 1 {
            return StdDuration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(3, StdDuration::from_millis(500))
    }
}

/// Runs `operation` until it succeeds, returns a non-retryable error, or the
/// attempts run out. The last error is returned in the latter two cases.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: BackoffPolicy,
    label: &str,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut last_error: Option<AppError> = None;

    for attempt in 1..=policy.max_attempts {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        debug!(target: "app::retry", operation = label, attempt, "attempting");

        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let retryable = err.is_retryable();
                warn!(
                    target: "app::retry",
                    operation = label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    retryable,
                    error = %err,
                    "attempt failed"
                );

                if !retryable {
                    return Err(err);
                }
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::other(format!("{label}: no attempts made"))))
}
