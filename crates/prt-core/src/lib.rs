pub mod config;
pub mod logging;

pub mod client;
pub mod context;
pub mod enhancer;
pub mod error;
pub mod interceptor;
pub mod response;
pub mod retry;
pub mod transport;

pub use client::Client;
pub use context::{Method, RequestConfig, RequestHandle, RetryOptions};
pub use enhancer::enhance;
pub use error::{Error, ErrorCode, LogicalFailure, PredicateError, TransportError};
pub use response::Response;
pub use retry::RetryConfig;
