//! Domain layer - Core business logic
//!
//! Contains value objects, platform descriptors, and the notification
//! normalization rules. This layer has no dependencies on external systems.

pub mod notification;
pub mod permissions;
pub mod platform;
pub mod registration;

// Re-export common types
pub use notification::{
    normalize, AndroidNotification, IosNotification, NotificationEvent, RawNotification,
};
pub use permissions::{PermissionPreferences, PermissionRequest, PermissionStatus};
pub use platform::{AppState, PermissionModel, Platform};
pub use registration::{DeviceToken, RegistrationEvent};
