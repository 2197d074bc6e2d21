//! Transport settings for [`ReqwestClient`].
//!
//! [`ReqwestClient`]: super::ReqwestClient

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Seconds a single API call may take before it fails with a timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent when none is configured. GitHub refuses anonymous agents.
const DEFAULT_USER_AGENT: &str = concat!("octohook/", env!("CARGO_PKG_VERSION"));

/// Timeout and identification of outgoing API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Seconds before an API call times out (0 uses the default)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent sent to the GitHub API
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Timeout applied to every call. Zero falls back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn effective_timeout(&self) -> Duration {
        let secs = match self.http_timeout {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs,
        };
        Duration::from_secs(secs)
    }

    /// User-Agent header value. Unset or blank values fall back to `octohook/<version>`.
    pub fn effective_user_agent(&self) -> String {
        match self.user_agent.as_deref().map(str::trim) {
            Some(agent) if !agent.is_empty() => agent.to_owned(),
            _ => DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
