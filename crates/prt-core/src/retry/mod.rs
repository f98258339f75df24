//! Generic retry primitive.
//!
//! Attempt counting, delay selection and the default network/idempotency
//! retry condition. This layer knows nothing about payloads; the enhancer
//! extends its condition with the classifier's per-request flag.

mod classify;
mod policy;
mod run;

pub use classify::{
    is_idempotent_request_error, is_network_error, is_network_or_idempotent_request_error,
    is_retryable_error,
};
pub use policy::{
    fixed_delay, no_delay, OnRetry, RetryCondition, RetryConfig, RetryDecision, RetryDelay,
    RetryPolicy,
};
pub use run::run_with_retry;
