//! Bounded retry with jittered exponential backoff.
//!
//! Applied as a decorator around each outbound call. Only transport errors
//! and 429/5xx responses are retried; anything else is the caller's to map.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::{Response, StatusCode};
use tracing::warn;

use crate::error::ProviderError;

/// Retry policy for one provider.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

/// Whether a response status is worth retrying.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

impl RetryPolicy {
    /// A policy that never waits, for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Exponential backoff with full jitter for the given attempt (1-based).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
            .min(self.max_delay);
        if exp.is_zero() {
            return exp;
        }
        let jittered = rand::thread_rng().gen_range(0..=exp.as_millis() as u64);
        Duration::from_millis(jittered)
    }

    /// Run `send` until it yields a non-retryable outcome or attempts run
    /// out. The final response is returned whatever its status; transport
    /// errors on the last attempt become [`ProviderError::Http`].
    pub async fn run<F, Fut>(&self, label: &str, mut send: F) -> Result<Response, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Response, reqwest::Error>>,
    {
        let mut attempt = 1;
        loop {
            let outcome = send().await;
            match outcome {
                Ok(response) if !is_retryable_status(response.status()) => return Ok(response),
                Ok(response) => {
                    if attempt >= self.max_attempts {
                        return Ok(response);
                    }
                    warn!(
                        "{label}: status {} on attempt {attempt}/{}, retrying",
                        response.status(),
                        self.max_attempts,
                    );
                }
                Err(err) => {
                    if attempt >= self.max_attempts {
                        return Err(ProviderError::Http(err));
                    }
                    warn!(
                        "{label}: transport error on attempt {attempt}/{}: {err}",
                        self.max_attempts,
                    );
                }
            }
            tokio::time::sleep(self.backoff_delay(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::OK));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn backoff_is_bounded_by_max_delay() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(300),
        };
        for attempt in 1..=10 {
            assert!(policy.backoff_delay(attempt) <= Duration::from_millis(300));
        }
    }

    #[test]
    fn immediate_policy_never_sleeps() {
        let policy = RetryPolicy::immediate(3);
        for attempt in 1..=3 {
            assert_eq!(policy.backoff_delay(attempt), Duration::ZERO);
        }
    }
}
