//! Repository events a hook can subscribe to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{Error, Result};

/// Event names the API accepts as subscription targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Wildcard matching every event.
    #[strum(serialize = "*")]
    #[serde(rename = "*")]
    All,
    CommitComment,
    Create,
    Delete,
    Deployment,
    DeploymentStatus,
    Download,
    Follow,
    Fork,
    ForkApply,
    Gist,
    Gollum,
    IssueComment,
    Issues,
    Member,
    Membership,
    PageBuild,
    Public,
    PullRequest,
    PullRequestReviewComment,
    Push,
    Release,
    Repository,
    Status,
    TeamAdd,
    Watch,
}

impl HookEvent {
    /// Wire names of every allowed event.
    pub const ALLOWED: &'static [&'static str] = Self::VARIANTS;

    /// Returns true if `name` is an allowed event name.
    pub fn is_allowed(name: &str) -> bool {
        Self::from_str(name).is_ok()
    }
}

/// Checks every name against the allowed events.
///
/// The whole list is inspected before anything is sent, so a single unknown
/// name rejects the call. The error names the first offending event.
pub fn validate_events<S: AsRef<str>>(events: &[S]) -> Result<()> {
    match events.iter().find(|e| !HookEvent::is_allowed(e.as_ref())) {
        Some(event) => Err(Error::validation()
            .with_message(format!("unknown hook event: {}", event.as_ref()))
            .with_context("event")),
        None => Ok(()),
    }
}
