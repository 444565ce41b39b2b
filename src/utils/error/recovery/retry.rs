//! Retry mechanism with exponential backoff

use super::types::{RetryConfig, Retryable};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry mechanism with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic.
    ///
    /// Only errors reporting [`Retryable::is_retryable`] are retried; a
    /// remote `retry_after` hint raises the wait to at least that long.
    pub async fn call<F, Fut, R, E>(&self, f: F) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: Retryable + std::fmt::Display,
    {
        self.call_when(f, E::is_retryable).await
    }

    /// Like [`Self::call`], but only errors accepted by `retry_on` are retried.
    pub async fn call_when<F, Fut, R, E, P>(
        &self,
        mut f: F,
        retry_on: P,
    ) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: Retryable + std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        let mut delay = self.config.base_delay();

        loop {
            attempt += 1;

            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !retry_on(&error) {
                        return Err(error);
                    }
                    if attempt >= self.config.max_attempts {
                        warn!("Giving up after {} attempts: {}", attempt, error);
                        return Err(error);
                    }

                    let wait = self.next_wait(delay, error.retry_after());
                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, error, wait
                    );
                    tokio::time::sleep(wait).await;

                    // Calculate next delay with exponential backoff
                    delay = std::cmp::min(
                        Duration::from_millis(
                            (delay.as_millis() as f64 * self.config.backoff_multiplier) as u64,
                        ),
                        self.config.max_delay(),
                    );
                }
            }
        }
    }

    fn next_wait(&self, delay: Duration, retry_after: Option<Duration>) -> Duration {
        let delay = if self.config.jitter {
            let jitter_factor = 0.1;
            let jitter =
                delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
            Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
        } else {
            delay
        };

        match retry_after {
            Some(hint) => std::cmp::min(std::cmp::max(delay, hint), self.config.max_delay()),
            None => delay,
        }
    }
}
