//! Response envelope returned by the transport.

use crate::context::{RequestConfig, RequestHandle};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// A transport-level response plus back-references to its request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Parsed payload; see [`parse_payload`].
    pub data: Value,
    pub config: Arc<RequestConfig>,
    pub request: RequestHandle,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Deserialize the payload into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.data)
    }
}

/// Parse a response body: JSON when it parses, otherwise the body as a string.
/// An empty body is `null`.
pub fn parse_payload(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}
