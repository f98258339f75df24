//! Response interceptors.
//!
//! Interceptors run in registration order on the outcome of every attempt:
//! a fulfilled outcome goes to `on_fulfilled`, a rejected one to
//! `on_rejected`, and whatever each returns feeds the next interceptor.

use crate::error::Error;
use crate::response::Response;
use std::sync::Arc;

/// Hook into the outcome of each attempt. Both methods pass through by default.
pub trait ResponseInterceptor: Send + Sync {
    fn on_fulfilled(&self, response: Response) -> Result<Response, Error> {
        Ok(response)
    }

    fn on_rejected(&self, error: Error) -> Result<Response, Error> {
        Err(error)
    }
}

/// Ordered list of response interceptors owned by a client.
#[derive(Clone, Default)]
pub struct Interceptors {
    response: Vec<Arc<dyn ResponseInterceptor>>,
}

impl Interceptors {
    /// Append an interceptor; it runs after all previously registered ones.
    pub fn use_response(&mut self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.response.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    pub(crate) fn run(&self, outcome: Result<Response, Error>) -> Result<Response, Error> {
        self.response
            .iter()
            .fold(outcome, |outcome, interceptor| match outcome {
                Ok(response) => interceptor.on_fulfilled(response),
                Err(error) => interceptor.on_rejected(error),
            })
    }
}
