//! HTTP transport abstraction used by API resources.
//!
//! Resources never touch sockets, headers, or credentials. They hand a path
//! and an optional JSON body to an [`HttpProvider`] and interpret the status
//! code and raw body that come back.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::Result;

/// HTTP verbs used by the API resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body, possibly empty.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns whether the body holds nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Core trait for issuing HTTP verbs against the API.
///
/// `path` is relative to the API root (for example `/repos/o/r/hooks`);
/// resolving it against a base URL is the provider's job.
#[async_trait::async_trait]
pub trait HttpProvider: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, path: &str) -> Result<HttpResponse>;

    /// Issues a POST request with an optional JSON body.
    async fn post(&self, path: &str, body: Option<String>) -> Result<HttpResponse>;

    /// Issues a PATCH request with a JSON body.
    async fn patch(&self, path: &str, body: String) -> Result<HttpResponse>;

    /// Issues a DELETE request.
    async fn delete(&self, path: &str) -> Result<HttpResponse>;
}

/// Cloneable handle to a shared [`HttpProvider`].
#[derive(Clone)]
pub struct HttpService {
    inner: Arc<dyn HttpProvider>,
}

impl HttpService {
    /// Wraps a provider for shared use.
    pub fn new<P>(provider: P) -> Self
    where
        P: HttpProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }
}

impl fmt::Debug for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpService").finish_non_exhaustive()
    }
}

impl Deref for HttpService {
    type Target = dyn HttpProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
