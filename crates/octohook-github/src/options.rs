//! API base configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default value of the `X-GitHub-Api-Version` header.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Options shared by every API call.
///
/// Resources only read these; the transport uses them to resolve paths and
/// decorate requests.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct GithubOptions {
    /// Base URL of the GitHub REST API
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)
    )]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Personal access token sent as a bearer token
    #[cfg_attr(
        feature = "config",
        arg(long = "api-token", env = "GITHUB_TOKEN", hide_env_values = true)
    )]
    #[serde(default)]
    pub api_token: Option<String>,

    /// Value of the X-GitHub-Api-Version header
    #[cfg_attr(
        feature = "config",
        arg(long = "api-version", env = "GITHUB_API_VERSION", default_value = DEFAULT_API_VERSION)
    )]
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

impl Default for GithubOptions {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            api_version: default_api_version(),
        }
    }
}

impl std::fmt::Debug for GithubOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubOptions")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl GithubOptions {
    /// Creates options pointing at the given API root.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the API version header value.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Parses the base URL.
    ///
    /// A trailing slash is dropped so that joining `/repos/...` never
    /// produces a double slash.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.api_url.trim_end_matches('/'))?;
        if url.cannot_be_a_base() {
            return Err(crate::Error::configuration()
                .with_message(format!("API URL cannot be a base: {}", self.api_url)));
        }
        Ok(url)
    }

    /// Resolves an API path against the base URL, keeping any base path prefix.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let base = self.base_url()?;
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GithubOptions::default();
        assert_eq!(options.api_url, "https://api.github.com");
        assert_eq!(options.api_version, DEFAULT_API_VERSION);
        assert!(options.api_token.is_none());
    }

    #[test]
    fn test_resolve_path() {
        let options = GithubOptions::default();
        let url = options.resolve("/repos/joomla/joomla-platform/hooks").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/joomla/joomla-platform/hooks"
        );
    }

    #[test]
    fn test_resolve_keeps_base_prefix() {
        let options = GithubOptions::new("https://ghe.example.com/api/v3/");
        let url = options.resolve("/repos/o/r/hooks/42").unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/o/r/hooks/42");
    }

    #[test]
    fn test_invalid_base_url() {
        let options = GithubOptions::new("not a url");
        let error = options.base_url().unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::Configuration);

        let options = GithubOptions::new("mailto:someone@example.com");
        assert!(options.base_url().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let options = GithubOptions::default().with_token("secret-token");
        let debug = format!("{options:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
