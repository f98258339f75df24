//! libcurl-backed transport.
//!
//! Each attempt uses a fresh easy handle on tokio's blocking pool, so a
//! request never reuses a connection from an earlier attempt.

use super::classify::classify_curl_error;
use super::parse::{header_line, parse_header_lines};
use super::Transport;
use crate::context::{Method, RequestConfig, RequestHandle};
use crate::error::{Error, ErrorCode, TransportError};
use crate::response::{parse_payload, Response};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Transport options shared by all requests of a client.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    /// Used when a request sets no timeout of its own.
    pub default_timeout: Duration,
    pub max_redirections: u32,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            default_timeout: Duration::from_secs(30),
            max_redirections: 10,
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

struct RawResponse {
    status: u32,
    header_lines: Vec<String>,
    body: Vec<u8>,
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(
        &self,
        config: Arc<RequestConfig>,
        request: RequestHandle,
    ) -> Result<Response, Error> {
        let opts = self.clone();
        let job_config = Arc::clone(&config);
        let joined = tokio::task::spawn_blocking(move || perform(&opts, &job_config)).await;

        let raw = match joined {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                let code = classify_curl_error(&e);
                let message = format!("{} {} failed: {}", request.method, request.url, e);
                return Err(TransportError::new(Some(code), message)
                    .with_request(config, request)
                    .with_source(e)
                    .into());
            }
            Err(join) => {
                return Err(TransportError::new(None, format!("transport task failed: {}", join))
                    .with_request(config, request)
                    .with_source(join)
                    .into());
            }
        };

        let status = u16::try_from(raw.status).unwrap_or(0);
        let response = Response {
            status,
            headers: parse_header_lines(&raw.header_lines),
            data: parse_payload(&raw.body),
            config: Arc::clone(&config),
            request: request.clone(),
        };
        if response.is_success() {
            return Ok(response);
        }
        Err(TransportError::new(
            Some(ErrorCode::BadStatus),
            format!("request failed with status code {}", status),
        )
        .with_request(config, request)
        .with_response(response)
        .into())
    }
}

/// Performs one blocking transfer and collects status, headers, and body.
fn perform(opts: &CurlTransport, config: &RequestConfig) -> Result<RawResponse, curl::Error> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&config.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(config.timeout.unwrap_or(opts.default_timeout))?;

    match config.method {
        Method::Get => easy.get(true)?,
        Method::Head => easy.nobody(true)?,
        Method::Post => easy.post(true)?,
        other => easy.custom_request(other.as_str())?,
    }
    if let Some(payload) = &config.body {
        if !matches!(config.method, Method::Get | Method::Head) {
            easy.post_fields_copy(payload)?;
        }
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &config.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !config.headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            header_lines.push(header_line(data));
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(RawResponse {
        status,
        header_lines,
        body,
    })
}
