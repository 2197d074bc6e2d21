//! Scripted transport for testing.
//!
//! [`MockTransport`] answers every call with a queued [`HttpResponse`] (or a
//! fallback once the queue is drained) and records what it was asked to do.
//!
//! # Feature Flag
//!
//! Outside this crate's own tests the module is only available with the
//! `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! octohook-github = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::Result;
use crate::transport::{HttpProvider, HttpResponse, HttpService, Method};

/// A single call seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Verb used.
    pub method: Method,
    /// Path relative to the API root.
    pub path: String,
    /// Raw request body, if any.
    pub body: Option<String>,
}

impl RecordedCall {
    /// Decodes the recorded body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<HttpResponse>,
    fallback: HttpResponse,
    calls: Vec<RecordedCall>,
}

/// In-memory [`HttpProvider`] with scripted responses.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock that answers `200` with an empty body.
    pub fn new() -> Self {
        Self::with_fallback(HttpResponse::new(200, ""))
    }

    /// Creates a mock that answers every call with `response`.
    pub fn with_fallback(response: HttpResponse) -> Self {
        let state = MockState {
            fallback: response,
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Shorthand for a mock answering every call with `status` and `body`.
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        Self::with_fallback(HttpResponse::new(status, body))
    }

    /// Queues a response for the next unanswered call.
    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.lock().queued.push_back(HttpResponse::new(status, body));
        self
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().calls.last().cloned()
    }

    /// Returns the number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Wraps a clone of this mock in an [`HttpService`].
    ///
    /// The clone shares recorded calls with `self`.
    pub fn service(&self) -> HttpService {
        HttpService::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // Recover from poisoning left by a panicking test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, method: Method, path: &str, body: Option<String>) -> HttpResponse {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            method,
            path: path.to_owned(),
            body,
        });
        match state.queued.pop_front() {
            Some(response) => response,
            None => state.fallback.clone(),
        }
    }
}

#[async_trait::async_trait]
impl HttpProvider for MockTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        Ok(self.record(Method::Get, path, None))
    }

    async fn post(&self, path: &str, body: Option<String>) -> Result<HttpResponse> {
        Ok(self.record(Method::Post, path, body))
    }

    async fn patch(&self, path: &str, body: String) -> Result<HttpResponse> {
        Ok(self.record(Method::Patch, path, Some(body)))
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse> {
        Ok(self.record(Method::Delete, path, None))
    }
}
