#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod event;
mod options;
mod transport;

pub mod hooks;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use event::{HookEvent, validate_events};
pub use hooks::{CreateHook, EditHook, Hook, HooksResource};
pub use options::{DEFAULT_API_URL, DEFAULT_API_VERSION, GithubOptions};
pub use transport::{HttpProvider, HttpResponse, HttpService, Method};
