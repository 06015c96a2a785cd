/*!
 * Retry policy for completion calls.
 *
 * The policy is an explicit object rather than inline control flow: a
 * maximum attempt count, a backoff function, and a classification of each
 * failure into backoff / fixed-delay / terminal. The generic retrying
 * helper is independent of which failure class it is handling.
 */

use log::warn;
use std::future::Future;
use std::time::Duration;

use crate::app_config::RetryConfig;
use crate::errors::CompletionError;

/// What the retry loop should do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryClass {
    /// Retry after exponential backoff (rate-limit class failures)
    Backoff,
    /// Retry after a short fixed delay (transient failures)
    FixedDelay,
    /// Stop immediately (safety blocks, timeouts, configuration errors)
    Terminal,
}

/// Retry policy consumed by [`call_with_retry`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Base backoff, doubled on each backoff retry
    pub backoff_base: Duration,
    /// Fixed delay before retrying a transient failure
    pub transient_delay: Duration,
}

impl RetryPolicy {
    /// Build a policy from the configuration tunables
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            transient_delay: Duration::from_millis(config.transient_delay_ms),
        }
    }

    /// Classify a failure into a retry action.
    ///
    /// Timeouts are terminal: the per-call timeout already bounded the wait,
    /// and the call is counted as a retry-loop failure rather than resumed.
    pub fn classify(&self, error: &CompletionError) -> RetryClass {
        match error {
            CompletionError::RateLimited(_) => RetryClass::Backoff,
            _ if error.is_retryable() => RetryClass::FixedDelay,
            _ => RetryClass::Terminal,
        }
    }

    /// Backoff delay for the given retry ordinal (1-based)
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Run a completion call through the retry policy.
///
/// Returns the first success, or the last failure once the policy gives up.
pub async fn call_with_retry<F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<String, CompletionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, CompletionError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(text) => return Ok(text),
            Err(error) => {
                let class = policy.classify(&error);
                let exhausted = attempt == policy.max_attempts;

                match class {
                    RetryClass::Terminal => return Err(error),
                    _ if exhausted => return Err(error),
                    RetryClass::Backoff => {
                        let delay = policy.backoff_delay(attempt);
                        warn!(
                            "Rate limited, retrying in {:?} (attempt {}/{})",
                            delay,
                            attempt + 1,
                            policy.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                    }
                    RetryClass::FixedDelay => {
                        warn!(
                            "Transient failure ({}), retrying in {:?} (attempt {}/{})",
                            error,
                            policy.transient_delay,
                            attempt + 1,
                            policy.max_attempts
                        );
                        tokio::time::sleep(policy.transient_delay).await;
                    }
                }

                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or(CompletionError::EmptyResponse))
}
