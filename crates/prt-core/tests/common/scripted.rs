//! In-process transport that replays scripted outcomes per URL.

use async_trait::async_trait;
use prt_core::context::{RequestConfig, RequestHandle};
use prt_core::error::{Error, ErrorCode, TransportError};
use prt_core::response::Response;
use prt_core::transport::Transport;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this status and payload.
    Reply(u16, Value),
    /// Fail without a response.
    Fail(ErrorCode),
}

#[derive(Default)]
struct Inner {
    steps: HashMap<String, VecDeque<Step>>,
    seen: Vec<RequestHandle>,
}

/// Cloneable handle; clones share the script and the call log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue steps for `url`, answered in order.
    pub fn script(&self, url: &str, steps: impl IntoIterator<Item = Step>) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .steps
            .entry(url.to_string())
            .or_default()
            .extend(steps);
        self
    }

    /// Attempts seen so far, across all URLs.
    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().seen.len()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .seen
            .iter()
            .filter(|h| h.url == url)
            .count()
    }

    pub fn remaining(&self, url: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .steps
            .get(url)
            .map_or(0, VecDeque::len)
    }

    pub fn handles(&self) -> Vec<RequestHandle> {
        self.inner.lock().unwrap().seen.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        config: Arc<RequestConfig>,
        request: RequestHandle,
    ) -> Result<Response, Error> {
        let step = {
            let mut inner = self.inner.lock().unwrap();
            inner.seen.push(request.clone());
            inner
                .steps
                .get_mut(&config.url)
                .and_then(VecDeque::pop_front)
        };
        match step {
            Some(Step::Reply(status, data)) => {
                let response = Response {
                    status,
                    headers: Vec::new(),
                    data,
                    config: Arc::clone(&config),
                    request: request.clone(),
                };
                if response.is_success() {
                    Ok(response)
                } else {
                    Err(TransportError::new(
                        Some(ErrorCode::BadStatus),
                        format!("request failed with status code {}", status),
                    )
                    .with_request(config, request)
                    .with_response(response)
                    .into())
                }
            }
            Some(Step::Fail(code)) => Err(TransportError::new(Some(code), "scripted failure")
                .with_request(config, request)
                .into()),
            None => Err(TransportError::new(Some(ErrorCode::Other), "script exhausted")
                .with_request(config, request)
                .into()),
        }
    }
}
