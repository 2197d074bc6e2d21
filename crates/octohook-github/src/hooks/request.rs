//! Request bodies for creating and editing hooks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::event::validate_events;

/// Body of a `POST /repos/{owner}/{repo}/hooks` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHook {
    /// Service name of the hook (for example `web`).
    pub name: String,
    /// Service specific settings such as `url` or `token`.
    pub config: BTreeMap<String, String>,
    /// Events that trigger a delivery.
    pub events: Vec<String>,
    /// Whether deliveries are sent.
    pub active: bool,
}

impl CreateHook {
    /// Creates an active hook with no config and no events.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BTreeMap::new(),
            events: Vec::new(),
            active: true,
        }
    }

    /// Adds one config entry.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole config map.
    pub fn with_config_map(mut self, config: BTreeMap<String, String>) -> Self {
        self.config = config;
        self
    }

    /// Sets the subscribed events.
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the hook is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Rejects the body if any event is not allowed.
    pub fn validate(&self) -> Result<()> {
        validate_events(&self.events).map_err(|e| e.with_context("events"))
    }
}

/// Body of a `PATCH /repos/{owner}/{repo}/hooks/{id}` request.
///
/// Empty event lists are left out of the JSON entirely, so an edit can add or
/// remove single events without replacing the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditHook {
    /// Service name of the hook.
    pub name: String,
    /// Service specific settings.
    pub config: BTreeMap<String, String>,
    /// Replaces the subscribed events when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    /// Events added to the current set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_events: Vec<String>,
    /// Events removed from the current set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_events: Vec<String>,
    /// Whether deliveries are sent.
    pub active: bool,
}

impl EditHook {
    /// Creates an active edit that touches no events.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BTreeMap::new(),
            events: Vec::new(),
            add_events: Vec::new(),
            remove_events: Vec::new(),
            active: true,
        }
    }

    /// Adds one config entry.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole config map.
    pub fn with_config_map(mut self, config: BTreeMap<String, String>) -> Self {
        self.config = config;
        self
    }

    /// Replaces the subscribed events.
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets events to add.
    pub fn with_add_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets events to remove.
    pub fn with_remove_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the hook is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Rejects the body if any of the three event lists holds an unknown name.
    pub fn validate(&self) -> Result<()> {
        validate_events(&self.events).map_err(|e| e.with_context("events"))?;
        validate_events(&self.add_events).map_err(|e| e.with_context("add_events"))?;
        validate_events(&self.remove_events).map_err(|e| e.with_context("remove_events"))?;
        Ok(())
    }
}
