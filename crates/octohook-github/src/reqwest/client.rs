//! Reqwest-based HTTP transport for the GitHub API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};

use super::{Error, ReqwestConfig, TRACING_TARGET};
use crate::transport::{HttpProvider, HttpResponse, HttpService, Method};
use crate::{GithubOptions, Result};

/// Media type GitHub recommends for REST calls.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Header carrying the requested REST API version.
pub const API_VERSION_HEADER: &str = "x-github-api-version";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    options: GithubOptions,
    config: ReqwestConfig,
}

/// Reqwest-based [`HttpProvider`] that resolves API paths against
/// [`GithubOptions::api_url`].
///
/// # Examples
///
/// ```rust,ignore
/// use octohook_github::reqwest::{ReqwestClient, ReqwestConfig};
/// use octohook_github::GithubOptions;
///
/// let client = ReqwestClient::new(GithubOptions::default(), ReqwestConfig::default())?;
/// let response = client.get("/repos/octocat/hello-world/hooks").await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("options", &self.inner.options)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse, a header
    /// value is not valid, or the HTTP client cannot be built.
    pub fn new(options: GithubOptions, config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            api_url = %options.api_url,
            timeout_ms = timeout.as_millis(),
            has_token = options.api_token.is_some(),
            "Creating reqwest client"
        );

        options.base_url()?;
        let headers = Self::default_headers(&options)?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::from)?;

        let inner = ReqwestClientInner {
            http,
            options,
            config,
        };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Reqwest client created successfully"
        );

        Ok(client)
    }

    /// Gets the API options.
    pub fn options(&self) -> &GithubOptions {
        &self.inner.options
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into an [`HttpService`] for use with dependency injection.
    pub fn into_service(self) -> HttpService {
        HttpService::new(self)
    }

    fn default_headers(options: &GithubOptions) -> super::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_str(&options.api_version)?,
        );

        if let Some(token) = &options.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.options.resolve(path)?;
        let http = &self.inner.http;
        Ok(match method {
            Method::Get => http.get(url),
            Method::Post => http.post(url),
            Method::Patch => http.patch(url),
            Method::Delete => http.delete(url),
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path,
            has_body = body.is_some(),
            "Sending request"
        );

        let mut request = self.request(method, path)?;
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                method = %method,
                path,
                error = %e,
                "Request failed"
            );
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(Error::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path,
            status,
            body_len = body.len(),
            "Received response"
        );

        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait::async_trait]
impl HttpProvider for ReqwestClient {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.send(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Option<String>) -> Result<HttpResponse> {
        self.send(Method::Post, path, body).await
    }

    async fn patch(&self, path: &str, body: String) -> Result<HttpResponse> {
        self.send(Method::Patch, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse> {
        self.send(Method::Delete, path, None).await
    }
}
