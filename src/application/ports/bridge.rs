//! Native notification bridge port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DeviceToken, PermissionRequest, PermissionStatus, Platform, RawNotification};

/// Bridge errors
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// The operation is not part of this platform's bridge
    #[error("Native operation not supported: {0}")]
    Unsupported(&'static str),

    /// The operation exists but the native call failed
    #[error("Native call failed: {0}")]
    CallFailed(String),
}

/// Events the native layer emits toward the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    Register,
    Notification,
}

impl NativeEvent {
    /// Wire name the native emitter uses for this event
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Notification => "notification",
        }
    }
}

/// A subscription handed to the bridge, one handler per event kind
pub enum EventListener {
    /// Registration with the push service completed; carries the device token
    Register(Box<dyn Fn(DeviceToken) + Send + Sync>),
    /// A notification arrived from the native layer
    Notification(Box<dyn Fn(RawNotification) + Send + Sync>),
}

impl EventListener {
    /// The event kind this listener subscribes to
    pub fn event(&self) -> NativeEvent {
        match self {
            Self::Register(_) => NativeEvent::Register,
            Self::Notification(_) => NativeEvent::Notification,
        }
    }
}

/// Port for the platform's native notification module.
///
/// Platforms differ in which operations they provide, so every operation
/// except [`NativeBridge::platform`] ships a default body reporting
/// [`BridgeError::Unsupported`]. A concrete bridge overrides exactly the
/// operations its platform has; callers treat `Unsupported` as "capability
/// absent on this platform" rather than as a failure.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// Which platform this bridge fronts
    fn platform(&self) -> Platform;

    /// Subscribe a listener; the bridge holds it until removed
    fn add_event_listener(&self, listener: EventListener) -> Result<(), BridgeError> {
        let _ = listener;
        Err(BridgeError::Unsupported("add_event_listener"))
    }

    /// Drop the listener for one event kind
    fn remove_event_listener(&self, event: NativeEvent) -> Result<(), BridgeError> {
        let _ = event;
        Err(BridgeError::Unsupported("remove_event_listener"))
    }

    /// Ask the OS for notification permissions.
    ///
    /// # Arguments
    /// * `request` - Capability set to prompt for, or the sender identifier
    ///   on token-registration platforms
    ///
    /// # Returns
    /// The permission set the user ended up granting
    async fn request_permissions(
        &self,
        request: PermissionRequest,
    ) -> Result<PermissionStatus, BridgeError> {
        let _ = request;
        Err(BridgeError::Unsupported("request_permissions"))
    }

    /// Report the currently granted permission set
    async fn check_permissions(&self) -> Result<PermissionStatus, BridgeError> {
        Err(BridgeError::Unsupported("check_permissions"))
    }

    /// Relinquish the push registration obtained from the OS
    fn abandon_permissions(&self) -> Result<(), BridgeError> {
        Err(BridgeError::Unsupported("abandon_permissions"))
    }

    /// The notification that launched the process, if any
    async fn initial_notification(&self) -> Result<Option<RawNotification>, BridgeError> {
        Err(BridgeError::Unsupported("initial_notification"))
    }

    /// Set the app icon badge counter
    fn set_badge_count(&self, count: u32) -> Result<(), BridgeError> {
        let _ = count;
        Err(BridgeError::Unsupported("set_badge_count"))
    }

    /// Read the app icon badge counter
    async fn badge_count(&self) -> Result<u32, BridgeError> {
        Err(BridgeError::Unsupported("badge_count"))
    }
}
