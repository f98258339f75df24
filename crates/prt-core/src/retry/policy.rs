use crate::context::RequestConfig;
use crate::error::{BoxError, Error, PredicateError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::classify::is_network_or_idempotent_request_error;

/// Decides whether a failed attempt should be retried. May itself fail.
pub type RetryCondition = Arc<dyn Fn(&Error) -> Result<bool, BoxError> + Send + Sync>;
/// Delay before retry number `n` (1-based) of a request.
pub type RetryDelay = Arc<dyn Fn(u32, &Error) -> Duration + Send + Sync>;
/// Called right before a retry is scheduled.
pub type OnRetry = Arc<dyn Fn(u32, &Error, &RequestConfig) + Send + Sync>;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Retry immediately.
pub fn no_delay() -> RetryDelay {
    Arc::new(|_: u32, _: &Error| Duration::ZERO)
}

/// Same delay before every retry.
pub fn fixed_delay(delay: Duration) -> RetryDelay {
    Arc::new(move |_: u32, _: &Error| delay)
}

/// Caller-facing retry configuration.
///
/// `retry_condition` left as `None` means
/// [`is_network_or_idempotent_request_error`].
#[derive(Clone)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    pub retries: u32,
    pub retry_delay: RetryDelay,
    pub retry_condition: Option<RetryCondition>,
    pub on_retry: Option<OnRetry>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay: no_delay(),
            retry_condition: None,
            on_retry: None,
        }
    }
}

impl RetryConfig {
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_delay<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, &Error) -> Duration + Send + Sync + 'static,
    {
        self.retry_delay = Arc::new(f);
        self
    }

    pub fn with_condition<F>(self, f: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.try_with_condition(move |e| Ok(f(e)))
    }

    pub fn try_with_condition<F>(mut self, f: F) -> Self
    where
        F: Fn(&Error) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.retry_condition = Some(Arc::new(f));
        self
    }

    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, &Error, &RequestConfig) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("retries", &self.retries)
            .field("retry_condition", &self.retry_condition.as_ref().map(|_| "<fn>"))
            .field("on_retry", &self.on_retry.as_ref().map(|_| "<fn>"))
            .finish_non_exhaustive()
    }
}

fn default_condition(error: &Error) -> Result<bool, BoxError> {
    Ok(is_network_or_idempotent_request_error(error))
}

/// Retry policy installed on a client; built from a [`RetryConfig`].
#[derive(Clone)]
pub struct RetryPolicy {
    retries: u32,
    delay: RetryDelay,
    condition: RetryCondition,
    on_retry: Option<OnRetry>,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        let condition = config
            .retry_condition
            .unwrap_or_else(|| Arc::new(default_condition));
        Self {
            retries: config.retries,
            delay: config.retry_delay,
            condition,
            on_retry: config.on_retry,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Decide what to do after `attempt` (1-based) failed with `error`.
    ///
    /// Predicate failures are never retried. A failing retry condition is
    /// returned as `Err` so the caller can surface it instead of `error`.
    pub fn decide(&self, attempt: u32, error: &Error) -> Result<RetryDecision, PredicateError> {
        if error.is_predicate_error() || attempt > self.retries {
            return Ok(RetryDecision::NoRetry);
        }
        if (self.condition)(error).map_err(PredicateError::new)? {
            Ok(RetryDecision::RetryAfter((self.delay)(attempt, error)))
        } else {
            Ok(RetryDecision::NoRetry)
        }
    }

    pub(crate) fn notify_retry(&self, retry_number: u32, error: &Error, config: &RequestConfig) {
        if let Some(hook) = &self.on_retry {
            hook(retry_number, error, config);
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}
