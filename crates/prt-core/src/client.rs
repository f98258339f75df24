//! HTTP client: transport + response interceptors + optional retry policy.

use crate::context::{RequestConfig, RequestHandle};
use crate::error::Error;
use crate::interceptor::Interceptors;
use crate::response::Response;
use crate::retry::{run_with_retry, RetryConfig, RetryPolicy};
use crate::transport::{CurlTransport, Transport};
use std::sync::Arc;

/// An HTTP client. Each request runs as a sequence of attempts; every
/// attempt goes through the transport and then the response interceptors,
/// and the installed retry policy (if any) decides whether to try again.
pub struct Client {
    transport: Arc<dyn Transport>,
    interceptors: Interceptors,
    retry: Option<RetryPolicy>,
}

impl Client {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            interceptors: Interceptors::default(),
            retry: None,
        }
    }

    /// Client over libcurl with default timeouts.
    pub fn with_curl() -> Self {
        Self::new(CurlTransport::default())
    }

    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    pub fn interceptors_mut(&mut self) -> &mut Interceptors {
        &mut self.interceptors
    }

    /// Install the retry mechanism. A client holds one policy; installing
    /// again replaces the previous one.
    pub fn install_retry(&mut self, config: RetryConfig) {
        if self.retry.is_some() {
            tracing::warn!("retry policy already installed on this client; replacing it");
        }
        self.retry = Some(RetryPolicy::new(config));
    }

    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry.as_ref()
    }

    pub async fn request(&self, config: RequestConfig) -> Result<Response, Error> {
        self.dispatch(Arc::new(config)).await
    }

    pub async fn get(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::get(url)).await
    }

    pub async fn delete(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::delete(url)).await
    }

    pub async fn head(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::head(url)).await
    }

    pub async fn options(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::options(url)).await
    }

    /// Bodyless POST; use [`Client::request`] with [`RequestConfig::json`] to send a payload.
    pub async fn post(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::post(url)).await
    }

    pub async fn put(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::put(url)).await
    }

    pub async fn patch(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.request(RequestConfig::patch(url)).await
    }

    /// Issue a request whose context the caller keeps a handle to, e.g. to
    /// inspect its retry state afterwards.
    pub async fn dispatch(&self, config: Arc<RequestConfig>) -> Result<Response, Error> {
        let first = RequestHandle::first(&config);
        run_with_retry(self.retry.as_ref(), &config, |attempt| {
            let handle = first.for_attempt(attempt);
            let config = Arc::clone(&config);
            async move {
                tracing::debug!(id = handle.id, attempt, "{} {}", handle.method, handle.url);
                let outcome = self.transport.send(config, handle).await;
                self.interceptors.run(outcome)
            }
        })
        .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("interceptors", &self.interceptors.len())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
