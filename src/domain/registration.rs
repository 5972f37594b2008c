//! Registration value objects

use std::fmt;

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Opaque device token handed out by the platform when registration completes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceToken(String);

impl DeviceToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeviceToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for DeviceToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Registration outcome delivered to the `on_register` callback.
///
/// The platform identifier rides along so consumers do not have to re-derive
/// which family the token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub token: DeviceToken,
    pub platform: Platform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_through_str() {
        let token = DeviceToken::from("abc123");
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.to_string(), "abc123");
    }

    #[test]
    fn registration_event_carries_platform() {
        let event = RegistrationEvent {
            token: DeviceToken::new("t0k3n"),
            platform: Platform::Android,
        };
        assert_eq!(event.platform.as_str(), "android");
        assert_eq!(event.token.as_str(), "t0k3n");
    }
}
