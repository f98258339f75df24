//! Transport: performs one attempt of a request.
//!
//! A transport resolves with a [`Response`] for 2xx answers and rejects with
//! [`crate::error::TransportError`] otherwise (network failure, or a non-2xx
//! status with the response attached).

mod classify;
mod libcurl;
mod parse;

use crate::context::{RequestConfig, RequestHandle};
use crate::error::Error;
use crate::response::Response;
use async_trait::async_trait;
use std::sync::Arc;

pub use self::classify::classify_curl_error;
pub use self::libcurl::CurlTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single attempt. Must not retry on its own.
    async fn send(&self, config: Arc<RequestConfig>, request: RequestHandle)
        -> Result<Response, Error>;
}
