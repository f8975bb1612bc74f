use crate::error::{Result, TranslateError};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first one). 0 means default.
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
    /// Upper bound for a single attempt. Zero means default.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy with the default timeout
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempt count with the unset value replaced by the default
    pub fn attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            DEFAULT_MAX_ATTEMPTS
        } else {
            self.max_attempts
        }
    }

    /// Per-attempt timeout with the unset value replaced by the default
    pub fn attempt_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Duration::ZERO)
    }
}

/// Execute an async operation with retries
///
/// Runs `operation` up to `policy.attempts()` times, sleeping `policy.delay`
/// between attempts. Only errors for which [`TranslateError::is_retryable`]
/// holds are retried; any other error is returned as-is.
///
/// `cancel` is raced against every attempt and every delay, and checked
/// before each attempt starts. A cancelled call returns
/// [`TranslateError::Cancelled`] without using up the remaining attempts.
///
/// When all attempts fail the result is [`TranslateError::RequestExhausted`]
/// wrapping the last failure.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.attempts();
    let mut last_error: Option<TranslateError> = None;

    for attempt in 0..max_attempts {
        // Wait before retry (except for first attempt)
        if attempt > 0 && !policy.delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                max_attempts,
                policy.delay
            );
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TranslateError::Cancelled),
                _ = sleep(policy.delay) => {}
            }
        }

        if cancel.is_cancelled() {
            debug!("{}: Cancelled before attempt {}", operation_name, attempt + 1);
            return Err(TranslateError::Cancelled);
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{}: Cancelled during attempt {}", operation_name, attempt + 1);
                return Err(TranslateError::Cancelled);
            }
            outcome = operation() => outcome,
        };

        match outcome {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) if !e.is_retryable() => {
                debug!(
                    "{}: Error is not retryable, failing immediately: {}",
                    operation_name, e
                );
                return Err(e);
            }
            Err(e) => {
                let remaining = max_attempts - attempt - 1;
                if remaining > 0 {
                    warn!(
                        "{}: Attempt {}/{} failed ({}), {} retries remaining",
                        operation_name,
                        attempt + 1,
                        max_attempts,
                        e,
                        remaining
                    );
                } else {
                    warn!(
                        "{}: All {} attempts failed. Last error: {}",
                        operation_name, max_attempts, e
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(TranslateError::RequestExhausted {
        attempts: max_attempts,
        last: Box::new(last_error.expect("At least one attempt should have been made")),
    })
}
