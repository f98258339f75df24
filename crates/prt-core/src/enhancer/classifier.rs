//! Response classifier: turns logically failed 2xx responses into errors.

use crate::context::RequestConfig;
use crate::error::{Error, LogicalFailure, PredicateError};
use crate::interceptor::ResponseInterceptor;
use crate::response::Response;
use serde_json::Value;

/// Whether `payload` is a logical failure for a request with `config`.
///
/// `false` when the request has no retry options or no payload predicate.
/// Does not touch the request's retry state.
pub fn is_logical_failure(config: &RequestConfig, payload: &Value) -> Result<bool, PredicateError> {
    match config.retry.as_ref().and_then(|r| r.evaluate(payload)) {
        None => Ok(false),
        Some(verdict) => verdict.map_err(PredicateError::new),
    }
}

/// Classify one fulfilled response.
///
/// A logical failure flags the request's `need_retry` and rejects with a
/// [`LogicalFailure`] wrapping the response; a failing predicate rejects with
/// [`Error::Predicate`] and leaves the flag alone.
pub fn classify_response(response: Response) -> Result<Response, Error> {
    if !is_logical_failure(&response.config, &response.data)? {
        return Ok(response);
    }
    if let Some(retry) = response.config.retry.as_ref() {
        retry.mark_need_retry();
    }
    tracing::debug!(
        id = response.request.id,
        attempt = response.request.attempt,
        status = response.status,
        "payload classified as logical failure"
    );
    Err(LogicalFailure::from_response(response).into())
}

/// Interceptor form of [`classify_response`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseClassifier;

impl ResponseInterceptor for ResponseClassifier {
    fn on_fulfilled(&self, response: Response) -> Result<Response, Error> {
        classify_response(response)
    }
}
