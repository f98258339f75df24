//! Retry loop: run attempts until success or the policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use crate::context::RequestConfig;
use crate::error::Error;
use crate::response::Response;
use std::future::Future;
use std::time::Duration;

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Runs `attempt_fn(attempt)` (1-based) until it succeeds or `policy` says to stop.
///
/// Without a policy the first outcome is returned as is. On a retryable
/// failure the `on_retry` hook runs, the delay elapses, then the next attempt
/// starts. The last error is returned unchanged when retries stop, except
/// that a failing retry condition replaces it.
pub async fn run_with_retry<F, Fut>(
    policy: Option<&RetryPolicy>,
    config: &RequestConfig,
    mut attempt_fn: F,
) -> Result<Response, Error>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Response, Error>>,
{
    let mut attempt = 1u32;
    loop {
        let err = match attempt_fn(attempt).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };
        let Some(policy) = policy else {
            return Err(err);
        };
        match policy.decide(attempt, &err)? {
            RetryDecision::NoRetry => {
                tracing::debug!(
                    url = %config.url,
                    attempt,
                    "giving up: {}",
                    err
                );
                return Err(err);
            }
            RetryDecision::RetryAfter(d) => {
                tracing::info!(
                    url = %config.url,
                    attempt,
                    delay_ms = millis(d),
                    logical = err.is_logical_failure(),
                    "retrying: {}",
                    err
                );
                policy.notify_retry(attempt, &err, config);
                if !d.is_zero() {
                    tokio::time::sleep(d).await;
                }
                attempt += 1;
            }
        }
    }
}
