//! Error types surfaced by the client, the classifier and the retry loop.
//!
//! Every error that can reach a retry condition carries (when known) the
//! request context it belongs to, so retry decisions can inspect per-request
//! state such as the `need_retry` flag.

use crate::context::{RequestConfig, RequestHandle};
use crate::response::Response;
use std::fmt;
use std::sync::Arc;

/// Boxed error used for caller-supplied predicate failures and transport sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Short machine-readable code for a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Connect or overall request timeout expired (treated as an abort).
    Timeout,
    /// Connection refused, reset, or dropped mid-transfer.
    Connection,
    /// Host (or proxy) name could not be resolved.
    DnsFailure,
    /// TLS handshake or certificate verification failed.
    Tls,
    /// Server answered with a non-2xx status.
    BadStatus,
    /// Any other transport failure.
    Other,
}

impl ErrorCode {
    /// Whether a failure with this code may be retried at all.
    ///
    /// Name resolution and certificate problems do not go away by trying again.
    pub fn is_retry_allowed(self) -> bool {
        !matches!(self, ErrorCode::DnsFailure | ErrorCode::Tls)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Timeout => "timeout",
            ErrorCode::Connection => "connection",
            ErrorCode::DnsFailure => "dns",
            ErrorCode::Tls => "tls",
            ErrorCode::BadStatus => "bad-status",
            ErrorCode::Other => "other",
        };
        f.write_str(s)
    }
}

/// Failure produced by the transport: network errors and non-2xx responses.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub code: Option<ErrorCode>,
    pub message: String,
    /// Request context, when the failure happened for a known request.
    pub config: Option<Arc<RequestConfig>>,
    pub request: Option<RequestHandle>,
    /// Present when the server answered (e.g. HTTP 5xx).
    pub response: Option<Response>,
    #[source]
    pub source: Option<BoxError>,
}

impl TransportError {
    pub fn new(code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            config: None,
            request: None,
            response: None,
            source: None,
        }
    }

    /// Attach the request context and handle of the attempt that failed.
    pub fn with_request(mut self, config: Arc<RequestConfig>, request: RequestHandle) -> Self {
        self.config = Some(config);
        self.request = Some(request);
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A transport-successful response whose payload the caller's predicate
/// classified as an application-level failure.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LogicalFailure {
    pub message: String,
    pub config: Arc<RequestConfig>,
    pub request: RequestHandle,
    /// The full response, so a final failure still exposes status and payload.
    pub response: Response,
}

impl LogicalFailure {
    pub(crate) fn from_response(response: Response) -> Self {
        let message = format!(
            "logical failure in HTTP {} response from {}",
            response.status, response.request.url
        );
        Self {
            message,
            config: Arc::clone(&response.config),
            request: response.request.clone(),
            response,
        }
    }
}

/// A retry predicate (payload predicate or retry condition) itself failed.
///
/// Wraps the predicate's own error unchanged; use [`PredicateError::downcast_ref`]
/// to recover it.
#[derive(Debug, thiserror::Error)]
#[error("retry predicate failed: {source}")]
pub struct PredicateError {
    #[source]
    source: BoxError,
}

impl PredicateError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

/// Error returned by [`crate::client::Client`] requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Logical(#[from] LogicalFailure),
    #[error(transparent)]
    Predicate(#[from] PredicateError),
}

impl Error {
    /// Request context this error belongs to, if known.
    pub fn config(&self) -> Option<&Arc<RequestConfig>> {
        match self {
            Error::Transport(e) => e.config.as_ref(),
            Error::Logical(e) => Some(&e.config),
            Error::Predicate(_) => None,
        }
    }

    pub fn request(&self) -> Option<&RequestHandle> {
        match self {
            Error::Transport(e) => e.request.as_ref(),
            Error::Logical(e) => Some(&e.request),
            Error::Predicate(_) => None,
        }
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Transport(e) => e.response.as_ref(),
            Error::Logical(e) => Some(&e.response),
            Error::Predicate(_) => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Transport(e) => e.code,
            _ => None,
        }
    }

    pub fn is_logical_failure(&self) -> bool {
        matches!(self, Error::Logical(_))
    }

    pub fn is_predicate_error(&self) -> bool {
        matches!(self, Error::Predicate(_))
    }
}
