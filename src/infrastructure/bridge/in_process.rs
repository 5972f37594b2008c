//! In-process notification bridge
//!
//! Backs the facade with an in-memory event channel: the embedding host
//! (or a test) pushes tokens, notifications, and permission outcomes into
//! the bridge, and the facade consumes them through the normal port.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{BridgeError, EventListener, NativeBridge, NativeEvent};
use crate::domain::{
    DeviceToken, PermissionPreferences, PermissionRequest, PermissionStatus, Platform,
    RawNotification,
};

/// Full-capability in-memory bridge; clones share all state.
#[derive(Clone)]
pub struct InProcessBridge {
    platform: Platform,
    listeners: Arc<Mutex<Vec<Arc<EventListener>>>>,
    granted: Arc<Mutex<PermissionStatus>>,
    registered_sender: Arc<Mutex<Option<String>>>,
    abandoned: Arc<AtomicBool>,
    initial: Arc<Mutex<Option<RawNotification>>>,
    badge: Arc<AtomicU32>,
}

impl InProcessBridge {
    /// Create a bridge for the given platform.
    ///
    /// Permission requests grant every capability until
    /// [`set_granted`](Self::set_granted) scripts something narrower.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            listeners: Arc::new(Mutex::new(Vec::new())),
            granted: Arc::new(Mutex::new(PermissionStatus {
                alert: true,
                badge: true,
                sound: true,
            })),
            registered_sender: Arc::new(Mutex::new(None)),
            abandoned: Arc::new(AtomicBool::new(false)),
            initial: Arc::new(Mutex::new(None)),
            badge: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Script the permission set the platform will grant
    pub fn set_granted(&self, status: PermissionStatus) {
        if let Ok(mut granted) = self.granted.lock() {
            *granted = status;
        }
    }

    /// Stage the notification that launched the process
    pub fn set_initial_notification(&self, raw: RawNotification) {
        if let Ok(mut initial) = self.initial.lock() {
            *initial = Some(raw);
        }
    }

    /// Sender identifier the facade registered with, if any
    pub fn registered_sender(&self) -> Option<String> {
        self.registered_sender
            .lock()
            .map(|sender| sender.clone())
            .unwrap_or(None)
    }

    /// Whether the registration was abandoned
    pub fn was_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }

    /// Current badge counter
    pub fn badge(&self) -> u32 {
        self.badge.load(Ordering::SeqCst)
    }

    /// Push a device token through every `register` listener
    pub fn emit_registration(&self, token: impl Into<DeviceToken>) {
        let token = token.into();
        for listener in self.snapshot_listeners() {
            if let EventListener::Register(handler) = listener.as_ref() {
                handler(token.clone());
            }
        }
    }

    /// Push a raw notification through every `notification` listener
    pub fn emit_notification(&self, raw: RawNotification) {
        for listener in self.snapshot_listeners() {
            if let EventListener::Notification(handler) = listener.as_ref() {
                handler(raw.clone());
            }
        }
    }

    // Handlers are invoked outside the lock so one of them may call back
    // into the bridge without deadlocking.
    fn snapshot_listeners(&self) -> Vec<Arc<EventListener>> {
        match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(Arc::clone).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn granted_for(&self, preferences: PermissionPreferences) -> PermissionStatus {
        let granted = self
            .granted
            .lock()
            .map(|granted| *granted)
            .unwrap_or_default();
        // Nothing is granted that was not asked for.
        PermissionStatus {
            alert: granted.alert && preferences.alert,
            badge: granted.badge && preferences.badge,
            sound: granted.sound && preferences.sound,
        }
    }
}

#[async_trait]
impl NativeBridge for InProcessBridge {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn add_event_listener(&self, listener: EventListener) -> Result<(), BridgeError> {
        self.listeners
            .lock()
            .map_err(|_| BridgeError::CallFailed("listener table poisoned".to_string()))?
            .push(Arc::new(listener));
        Ok(())
    }

    fn remove_event_listener(&self, event: NativeEvent) -> Result<(), BridgeError> {
        self.listeners
            .lock()
            .map_err(|_| BridgeError::CallFailed("listener table poisoned".to_string()))?
            .retain(|listener| listener.event() != event);
        Ok(())
    }

    async fn request_permissions(
        &self,
        request: PermissionRequest,
    ) -> Result<PermissionStatus, BridgeError> {
        self.abandoned.store(false, Ordering::SeqCst);
        match request {
            PermissionRequest::Capabilities(preferences) => Ok(self.granted_for(preferences)),
            PermissionRequest::SenderId(sender_id) => {
                if let Ok(mut sender) = self.registered_sender.lock() {
                    *sender = Some(sender_id);
                }
                Ok(self
                    .granted
                    .lock()
                    .map(|granted| *granted)
                    .unwrap_or_default())
            }
        }
    }

    async fn check_permissions(&self) -> Result<PermissionStatus, BridgeError> {
        if self.abandoned.load(Ordering::SeqCst) {
            return Ok(PermissionStatus::default());
        }
        Ok(self
            .granted
            .lock()
            .map(|granted| *granted)
            .unwrap_or_default())
    }

    fn abandon_permissions(&self) -> Result<(), BridgeError> {
        self.abandoned.store(true, Ordering::SeqCst);
        if let Ok(mut sender) = self.registered_sender.lock() {
            *sender = None;
        }
        Ok(())
    }

    async fn initial_notification(&self) -> Result<Option<RawNotification>, BridgeError> {
        Ok(self
            .initial
            .lock()
            .map(|initial| initial.clone())
            .unwrap_or(None))
    }

    fn set_badge_count(&self, count: u32) -> Result<(), BridgeError> {
        self.badge.store(count, Ordering::SeqCst);
        Ok(())
    }

    async fn badge_count(&self) -> Result<u32, BridgeError> {
        Ok(self.badge.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AndroidNotification;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn listeners_receive_emitted_events() {
        let bridge = InProcessBridge::new(Platform::Android);
        let tokens = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&tokens);
        bridge
            .add_event_listener(EventListener::Register(Box::new(move |token| {
                sink.lock().unwrap().push(token.to_string());
            })))
            .unwrap();

        bridge.emit_registration("tok-1");
        bridge.emit_registration("tok-2");

        assert_eq!(tokens.lock().unwrap().as_slice(), &["tok-1", "tok-2"]);
    }

    #[tokio::test]
    async fn removed_listeners_stop_receiving() {
        let bridge = InProcessBridge::new(Platform::Android);
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        bridge
            .add_event_listener(EventListener::Notification(Box::new(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            })))
            .unwrap();

        bridge.emit_notification(RawNotification::Android(AndroidNotification::new()));
        bridge.remove_event_listener(NativeEvent::Notification).unwrap();
        bridge.emit_notification(RawNotification::Android(AndroidNotification::new()));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn grants_are_capped_by_the_request() {
        let bridge = InProcessBridge::new(Platform::Ios);
        bridge.set_granted(PermissionStatus {
            alert: true,
            badge: true,
            sound: false,
        });

        let granted = bridge
            .request_permissions(PermissionRequest::Capabilities(PermissionPreferences {
                alert: true,
                badge: false,
                sound: true,
            }))
            .await
            .unwrap();

        assert!(granted.alert);
        assert!(!granted.badge);
        assert!(!granted.sound);
    }

    #[tokio::test]
    async fn sender_registration_is_recorded() {
        let bridge = InProcessBridge::new(Platform::Android);
        bridge
            .request_permissions(PermissionRequest::SenderId("sender-7".into()))
            .await
            .unwrap();
        assert_eq!(bridge.registered_sender().as_deref(), Some("sender-7"));
    }

    #[tokio::test]
    async fn abandoning_revokes_until_the_next_request() {
        let bridge = InProcessBridge::new(Platform::Ios);
        bridge.abandon_permissions().unwrap();
        assert!(bridge.was_abandoned());
        assert!(!bridge.check_permissions().await.unwrap().any_granted());

        bridge
            .request_permissions(PermissionRequest::Capabilities(
                PermissionPreferences::default(),
            ))
            .await
            .unwrap();
        assert!(bridge.check_permissions().await.unwrap().any_granted());
    }

    #[tokio::test]
    async fn initial_notification_is_not_consumed_by_reads() {
        let bridge = InProcessBridge::new(Platform::Android);
        assert_eq!(bridge.initial_notification().await.unwrap(), None);

        let raw = RawNotification::Android(
            AndroidNotification::new().with_field("message", serde_json::json!("boot")),
        );
        bridge.set_initial_notification(raw.clone());

        assert_eq!(bridge.initial_notification().await.unwrap(), Some(raw.clone()));
        assert_eq!(bridge.initial_notification().await.unwrap(), Some(raw));
    }

    #[tokio::test]
    async fn badge_counter_round_trips() {
        let bridge = InProcessBridge::new(Platform::Ios);
        bridge.set_badge_count(5).unwrap();
        assert_eq!(bridge.badge_count().await.unwrap(), 5);
        assert_eq!(bridge.badge(), 5);
    }
}
