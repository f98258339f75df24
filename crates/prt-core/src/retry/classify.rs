//! Default retry conditions: network failures and idempotent-request failures.

use crate::error::{Error, ErrorCode};

/// Network-level failure: no response, a known error code, not an abort/timeout,
/// and not one of the codes that retrying cannot fix (DNS, TLS).
pub fn is_network_error(error: &Error) -> bool {
    let Error::Transport(e) = error else {
        return false;
    };
    if e.response.is_some() {
        return false;
    }
    match e.code {
        Some(ErrorCode::Timeout) | None => false,
        Some(code) => code.is_retry_allowed(),
    }
}

/// Not a timeout, and either no response at all or a 5xx response.
pub fn is_retryable_error(error: &Error) -> bool {
    if error.code() == Some(ErrorCode::Timeout) || error.is_predicate_error() {
        return false;
    }
    match error.response() {
        None => true,
        Some(r) => (500..=599).contains(&r.status),
    }
}

/// Retryable failure of a request whose method is idempotent.
pub fn is_idempotent_request_error(error: &Error) -> bool {
    let Some(config) = error.config() else {
        return false;
    };
    is_retryable_error(error) && config.method.is_idempotent()
}

/// Default retry condition.
pub fn is_network_or_idempotent_request_error(error: &Error) -> bool {
    is_network_error(error) || is_idempotent_request_error(error)
}
