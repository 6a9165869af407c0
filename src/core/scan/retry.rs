//! Exponential backoff for transient detection service errors

use crate::config::RetryConfig;
use crate::domain::errors::ServiceError;
use crate::log_retry_attempt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy derived from [`RetryConfig`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    /// Build a policy from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            multiplier: config.backoff_multiplier,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Delay before retry number `retry` (0-based), capped at the max delay
    pub fn delay_for(&self, retry: usize) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let millis = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Run `operation`, retrying transient failures
    ///
    /// Non-transient errors are returned immediately. After `max_retries`
    /// retries the last error is returned.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, ServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let mut retries = 0;

        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retries < self.max_retries => {
                    let delay = self.delay_for(retries);
                    retries += 1;
                    log_retry_attempt!(retries, self.max_retries, operation, e);
                    tracing::debug!(delay_ms = delay.as_millis() as u64, "Backing off");
                    sleep(delay).await;
                }
                Err(e) => {
                    if retries > 0 {
                        tracing::warn!(
                            operation,
                            retries,
                            error = %e,
                            "Giving up after retries"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }
}
