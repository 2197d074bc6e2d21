//! Typed views over hook responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Message used when an error body carries no usable `message`.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response received from GitHub.";

/// A repository hook as returned by the API.
///
/// Operations hand back the raw JSON; decode into this type when the fixed
/// fields are needed. Fields the type does not name are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    /// Server-assigned identifier.
    pub id: u64,
    /// Service name.
    #[serde(default)]
    pub name: String,
    /// Service specific settings.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Subscribed events.
    #[serde(default)]
    pub events: Vec<String>,
    /// Whether deliveries are sent.
    #[serde(default)]
    pub active: bool,
    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hook {
    /// Decodes a hook from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes a list of hooks from a JSON array.
    pub fn list_from_value(value: Value) -> Result<Vec<Self>> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Error payload sent alongside a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable description.
    #[serde(default)]
    pub message: Option<String>,
    /// Link to the relevant API documentation.
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl ApiErrorBody {
    /// Extracts the error message from a raw body.
    ///
    /// Falls back to [`INVALID_RESPONSE_MESSAGE`] when the body is not JSON or
    /// has no string `message`.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|error| error.message)
            .unwrap_or_else(|| INVALID_RESPONSE_MESSAGE.to_owned())
    }
}
