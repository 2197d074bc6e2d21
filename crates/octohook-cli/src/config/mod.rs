//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── github: GithubOptions   # API root, token, API version
//! ├── http: ReqwestConfig     # Timeout, user agent
//! └── command: Command        # Hook operation to run
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//!
//! # Example
//!
//! ```bash
//! # List hooks of a repository
//! octohook --api-token "$TOKEN" list octocat hello-world
//!
//! # Or via environment variables
//! GITHUB_TOKEN="..." HTTP_TIMEOUT=10 octohook get octocat hello-world 42
//! ```

use std::process;

use anyhow::{Context, anyhow};
use clap::Parser;
use octohook_github::reqwest::{ReqwestClient, ReqwestConfig};
use octohook_github::{GithubOptions, HooksResource};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "octohook")]
#[command(about = "Manage GitHub repository webhooks")]
#[command(version)]
pub struct Cli {
    /// GitHub API connection options.
    #[clap(flatten)]
    pub github: GithubOptions,

    /// HTTP transport options.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr; stdout is reserved for command output.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.github
            .base_url()
            .context("invalid GitHub API URL")?;

        if self.github.api_version.trim().is_empty() {
            return Err(anyhow!("GitHub API version cannot be empty"));
        }

        Ok(())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.github.api_url,
            api_version = %self.github.api_version,
            has_token = self.github.api_token.is_some(),
            http_timeout_secs = self.http.effective_timeout().as_secs(),
            user_agent = %self.http.effective_user_agent(),
            "GitHub configuration"
        );
    }

    /// Builds the hooks resource on top of a reqwest transport.
    pub fn hooks(&self) -> anyhow::Result<HooksResource> {
        let client = ReqwestClient::new(self.github.clone(), self.http.clone())
            .context("failed to create HTTP client")?;
        Ok(HooksResource::new(self.github.clone(), client.into_service()))
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
