use crate::{data::ResponseData, error::Error};
use async_trait::async_trait;
use std::{fmt::Debug, future::Future, time::Duration};
use tracing::warn;

/// How often and how patiently a request is repeated after a transient failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    retry_count: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    pub fn no_retries() -> Self {
        Self::new(0, Duration::from_secs(0))
    }

    /// Extra attempts allowed after the first one.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retries()
    }
}

#[async_trait]
pub trait Sleeper: Debug {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Whether an attempt ended in a way that another attempt could fix: a network failure or a 5xx.
pub fn is_transient(result: &Result<ResponseData, Error>) -> bool {
    match result {
        Ok(response) => response.is_server_error(),
        Err(error) => error.is_transient(),
    }
}

/// Runs `attempt` until it produces a non-transient result or the policy runs out of attempts.
///
/// `attempt` receives the 1-based attempt number. Between attempts the `sleeper` waits for the
/// policy's retry delay. When attempts are exhausted the last 5xx response is returned as is, and
/// a network error is returned with the number of attempts that were made.
pub async fn retry<F, Fut>(
    policy: &RetryPolicy,
    sleeper: &(dyn Sleeper + Send + Sync),
    mut attempt: F,
) -> Result<ResponseData, Error>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<ResponseData, Error>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt_number = 1;

    loop {
        let result = attempt(attempt_number).await;

        if !is_transient(&result) {
            return result;
        }

        if attempt_number >= max_attempts {
            return result.map_err(|error| match error {
                Error::NetworkError(mut network_error) => {
                    network_error.attempts = attempt_number;
                    Error::NetworkError(network_error)
                }
                other => other,
            });
        }

        match &result {
            Ok(response) => warn!(
                "Retrying ({}/{}) after status {}",
                attempt_number, policy.retry_count, response.status_code
            ),
            Err(error) => warn!(
                "Retrying ({}/{}) after error: {}",
                attempt_number, policy.retry_count, error
            ),
        }

        sleeper.sleep(policy.retry_delay).await;
        attempt_number += 1;
    }
}
