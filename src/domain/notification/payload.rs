//! Raw inbound notification payloads, one variant per platform family

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notification payload exactly as the platform bridge hands it over,
/// before normalization.
///
/// The two families diverge: the iOS bridge delivers a structured record
/// with dedicated fields, the Android bridge delivers a flat key/value
/// bundle whose shape is up to whoever sent the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawNotification {
    Ios(IosNotification),
    Android(AndroidNotification),
}

impl RawNotification {
    /// The payload's own claim about foreground arrival, when it carries one
    pub fn foreground_flag(&self) -> Option<bool> {
        match self {
            Self::Ios(payload) => payload.foreground,
            Self::Android(payload) => payload.field("foreground").and_then(Value::as_bool),
        }
    }
}

/// Structured payload from the iOS bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IosNotification {
    /// Whether the payload arrived while the app was foregrounded,
    /// when the bridge reports it
    #[serde(default)]
    pub foreground: Option<bool>,
    /// Human-readable body text
    #[serde(default)]
    pub message: Option<String>,
    /// Application-defined payload
    #[serde(default)]
    pub data: Value,
    /// Requested icon badge count
    #[serde(default)]
    pub badge: Option<u32>,
    /// Raw alert as sent: a plain string or a `{title, body, ...}` object
    #[serde(default)]
    pub alert: Option<Value>,
    /// Sound file name to play
    #[serde(default)]
    pub sound: Option<String>,
}

/// Flat key/value bundle from the Android bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AndroidNotification {
    fields: Map<String, Value>,
}

impl AndroidNotification {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle from an existing field map
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Add a field, replacing any previous value under the same key
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Borrow the whole field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the bundle, yielding the field map
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}
