//! Platform family value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Native platform families the facade can sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Get the string identifier delivered alongside registration events
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// How this platform grants permission to receive notifications
    pub const fn permission_model(&self) -> PermissionModel {
        match self {
            Self::Ios => PermissionModel::Prompt,
            Self::Android => PermissionModel::SenderId,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permission acquisition styles.
///
/// `Prompt` platforms show an interactive dialog and answer with the granted
/// capability set; `SenderId` platforms register against a project/sender
/// identifier without prompting the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionModel {
    Prompt,
    SenderId,
}

/// Host application lifecycle states as reported by the app-state source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    #[default]
    Active,
    Inactive,
    Background,
}

impl AppState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Background => "background",
        }
    }

    /// Whether the host process is currently backgrounded
    pub const fn is_background(&self) -> bool {
        matches!(self, Self::Background)
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
