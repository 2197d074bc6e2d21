//! Reqwest-based HTTP transport.
//!
//! This module provides a reqwest-based implementation of the [`HttpProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use octohook_github::reqwest::{ReqwestClient, ReqwestConfig};
//! use octohook_github::{GithubOptions, HttpService};
//!
//! let client = ReqwestClient::new(GithubOptions::default(), ReqwestConfig::default())?;
//!
//! // Convert to a service for dependency injection
//! let service: HttpService = client.into_service();
//! ```
//!
//! [`HttpProvider`]: crate::HttpProvider

mod client;
mod config;
mod error;

pub use client::{API_VERSION_HEADER, GITHUB_MEDIA_TYPE, ReqwestClient};
pub use config::{DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "octohook_github::reqwest";
