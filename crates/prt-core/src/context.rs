//! Per-request configuration ("request context") and the retry sub-configuration.
//!
//! A `RequestConfig` is wrapped in an `Arc` when a request is issued and that
//! same instance is shared by every attempt of the request: the transport,
//! the response interceptors and the retry condition all see it. Nothing is
//! shared between different requests.

use crate::error::BoxError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Methods that may be repeated without changing server state.
    pub fn is_idempotent(self) -> bool {
        matches!(
            self,
            Method::Get | Method::Head | Method::Options | Method::Put | Method::Delete
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload predicate: `Ok(true)` means the payload reports a logical failure.
pub type ShouldRetry = Arc<dyn Fn(&Value) -> Result<bool, BoxError> + Send + Sync>;

/// Retry sub-configuration attached to a single request.
#[derive(Default)]
pub struct RetryOptions {
    need_retry: AtomicBool,
    should_retry: Option<ShouldRetry>,
}

impl RetryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify payloads with an infallible predicate.
    pub fn should_retry<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.try_should_retry(move |payload| Ok(f(payload)))
    }

    /// Classify payloads with a predicate that may fail. A failure is
    /// surfaced to the caller as [`crate::Error::Predicate`] and never retried.
    pub fn try_should_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.should_retry = Some(Arc::new(f));
        self
    }

    /// Classify payloads after deserializing them into `T`.
    /// A payload that does not deserialize is a predicate failure.
    pub fn should_retry_as<T, F>(self, f: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_should_retry(move |payload| {
            let typed = T::deserialize(payload)?;
            Ok(f(&typed))
        })
    }

    pub fn has_predicate(&self) -> bool {
        self.should_retry.is_some()
    }

    /// Run the payload predicate; `None` when no predicate was configured.
    pub fn evaluate(&self, payload: &Value) -> Option<Result<bool, BoxError>> {
        self.should_retry.as_ref().map(|f| f(payload))
    }

    /// True once any attempt of this request was classified as a logical failure.
    pub fn need_retry(&self) -> bool {
        self.need_retry.load(Ordering::Acquire)
    }

    pub(crate) fn mark_need_retry(&self) {
        self.need_retry.store(true, Ordering::Release);
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("need_retry", &self.need_retry())
            .field("should_retry", &self.should_retry.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Request context: everything needed to (re)issue a request, plus retry state.
#[derive(Debug)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Overall transfer timeout; the transport default applies when unset.
    pub timeout: Option<Duration>,
    pub retry: Option<RetryOptions>,
}

impl RequestConfig {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
            retry: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::Head, url)
    }

    pub fn options(url: impl Into<String>) -> Self {
        Self::new(Method::Options, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON request body and set `Content-Type`.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry(mut self, retry: RetryOptions) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Shorthand for `self.retry.as_ref().is_some_and(RetryOptions::need_retry)`.
    pub fn need_retry(&self) -> bool {
        self.retry.as_ref().is_some_and(RetryOptions::need_retry)
    }
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Low-level handle identifying one attempt of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHandle {
    /// Process-unique id shared by all attempts of a request.
    pub id: u64,
    /// 1-based attempt number.
    pub attempt: u32,
    pub method: Method,
    pub url: String,
}

impl RequestHandle {
    pub(crate) fn first(config: &RequestConfig) -> Self {
        Self {
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            attempt: 1,
            method: config.method,
            url: config.url.clone(),
        }
    }

    pub(crate) fn for_attempt(&self, attempt: u32) -> Self {
        Self {
            attempt,
            ..self.clone()
        }
    }
}
