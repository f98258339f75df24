//! Payload-aware retries for a [`Client`].
//!
//! [`enhance`] registers the [`ResponseClassifier`] as a response interceptor
//! and then installs the retry policy with its condition extended by
//! [`with_logical_failures`]. Because interceptors run on every attempt before
//! the retry decision, a logical failure is visible to the retry condition on
//! the same attempt that produced it.
//!
//! ```no_run
//! use prt_core::client::Client;
//! use prt_core::context::{RequestConfig, RetryOptions};
//! use prt_core::enhancer::enhance;
//! use prt_core::retry::RetryConfig;
//!
//! # async fn run() -> Result<(), prt_core::error::Error> {
//! let mut client = Client::with_curl();
//! enhance(&mut client, RetryConfig::default());
//!
//! let res = client
//!     .request(
//!         RequestConfig::get("http://example.com/api")
//!             .retry(RetryOptions::new().should_retry(|d| d["code"] != 0)),
//!     )
//!     .await?;
//! assert_eq!(res.data["code"], 0);
//! # Ok(())
//! # }
//! ```

mod adapter;
mod classifier;

use crate::client::Client;
use crate::retry::RetryConfig;
use std::sync::Arc;

pub use adapter::{flagged_for_retry, with_logical_failures};
pub use classifier::{classify_response, is_logical_failure, ResponseClassifier};

/// Register the classifier, then install the extended retry policy.
///
/// Not idempotent: calling it twice registers a second classifier and
/// replaces the installed retry policy. Call it once per client.
pub fn enhance(client: &mut Client, config: RetryConfig) {
    client
        .interceptors_mut()
        .use_response(Arc::new(ResponseClassifier));
    client.install_retry(with_logical_failures(config));
}
