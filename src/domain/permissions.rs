//! Permission value objects

use serde::{Deserialize, Serialize};

/// Desired notification capability set.
///
/// The default asks for everything, matching what embedding applications
/// almost always want; `configure` keeps the last explicitly supplied set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPreferences {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
}

impl Default for PermissionPreferences {
    fn default() -> Self {
        Self {
            alert: true,
            badge: true,
            sound: true,
        }
    }
}

/// Capability set the platform actually granted.
///
/// Prompt platforms answer permission requests and checks with this; token
/// platforms have nothing meaningful to report and answer with the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionStatus {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
}

impl PermissionStatus {
    /// Whether any capability was granted
    pub const fn any_granted(&self) -> bool {
        self.alert || self.badge || self.sound
    }
}

/// Argument carried by a permission request, one variant per platform family.
///
/// Prompt platforms receive the desired capability set; token platforms
/// receive the sender identifier they register against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionRequest {
    Capabilities(PermissionPreferences),
    SenderId(String),
}
