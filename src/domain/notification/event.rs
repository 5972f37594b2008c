//! Canonical notification shape handed to application callbacks

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A notification after normalization, identical in shape on every platform.
///
/// Platform quirks are resolved before an event is constructed: the
/// Android bundle's well-known keys are lifted into dedicated fields,
/// the `data` string form is parsed, and `foreground` reflects the app
/// state at delivery rather than only the payload's own claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// Whether the app was in the foreground when the notification arrived
    pub foreground: bool,
    /// Whether the user opened the notification to reach the app.
    /// `None` when the platform never reported it. The iOS bridge conflates
    /// this with background delivery, so there it always mirrors
    /// `!foreground`.
    #[serde(default)]
    pub user_interaction: Option<bool>,
    /// Notification title, when one was sent
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable body text
    #[serde(default)]
    pub message: Option<String>,
    /// Requested icon badge count
    #[serde(default)]
    pub badge: Option<u32>,
    /// Raw alert payload: a plain string or a `{title, body, ...}` object
    #[serde(default)]
    pub alert: Option<Value>,
    /// Sound file name to play
    #[serde(default)]
    pub sound: Option<String>,
    /// Application-defined payload. Always structured when the sender
    /// provided valid JSON; falls back to the raw string otherwise.
    #[serde(default)]
    pub data: Value,
    /// Remaining platform fields that have no dedicated slot
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}
