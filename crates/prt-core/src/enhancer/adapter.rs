//! Retry policy adapter: OR the classifier's flag into the retry condition.

use crate::error::{BoxError, Error};
use crate::retry::{is_network_or_idempotent_request_error, RetryConfig};
use std::sync::Arc;

/// True when the request behind `error` was classified as a logical failure.
/// `false` for errors without a request context.
pub fn flagged_for_retry(error: &Error) -> bool {
    error.config().is_some_and(|c| c.need_retry())
}

/// Extend `config` so that logically failed requests are retried too.
///
/// The caller's condition (or the default network/idempotency condition)
/// runs first; an error from it is propagated as is.
pub fn with_logical_failures(config: RetryConfig) -> RetryConfig {
    let base = config.retry_condition.clone();
    config.try_with_condition(move |error: &Error| -> Result<bool, BoxError> {
        let base_says = match &base {
            Some(condition) => condition(error)?,
            None => is_network_or_idempotent_request_error(error),
        };
        Ok(base_says || flagged_for_retry(error))
    })
}
