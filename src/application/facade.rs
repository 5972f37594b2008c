//! Notification facade over the platform bridge

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    normalize, DeviceToken, NotificationEvent, PermissionModel, PermissionPreferences,
    PermissionRequest, PermissionStatus, Platform, RawNotification, RegistrationEvent,
};

use super::ports::{AppStateSource, BridgeError, EventListener, NativeBridge, NativeEvent};

/// Callback invoked when the platform hands over a device token
pub type RegistrationCallback = Box<dyn Fn(RegistrationEvent) + Send + Sync>;

/// Callback invoked for every normalized notification
pub type NotificationCallback = Box<dyn Fn(NotificationEvent) + Send + Sync>;

/// Callback reserved for bridge failures
pub type ErrorCallback = Box<dyn Fn(BridgeError) + Send + Sync>;

/// Options accepted by [`Notifications::configure`].
///
/// Every field is optional; fields left at `None` keep whatever the facade
/// already holds, so a later `configure` call can swap callbacks without
/// touching the rest.
pub struct ConfigureOptions {
    /// Called once the platform registers for push and yields a token
    pub on_register: Option<RegistrationCallback>,
    /// Called for every incoming notification, already normalized
    pub on_notification: Option<NotificationCallback>,
    /// Called when a bridge operation fails.
    ///
    /// Accepted and stored, but no delivery or permission path invokes it
    /// today: failures in this layer degrade silently instead. The hook
    /// stays on the options surface so existing callers keep compiling
    /// while that gap remains an open product question.
    pub on_error: Option<ErrorCallback>,
    /// Capability set to request on prompt platforms
    pub permissions: Option<PermissionPreferences>,
    /// Sender identifier for token-registration platforms
    pub sender_id: Option<String>,
    /// Whether configure should trigger the permission flow (default true)
    pub request_permissions: bool,
    /// Whether the first configure should replay the notification that
    /// launched the process (default true)
    pub pop_initial_notification: bool,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            on_register: None,
            on_notification: None,
            on_error: None,
            permissions: None,
            sender_id: None,
            request_permissions: true,
            pop_initial_notification: true,
        }
    }
}

/// Consumer callbacks currently installed on the facade
#[derive(Default)]
#[allow(clippy::type_complexity)]
struct CallbackSet {
    on_register: Option<Arc<dyn Fn(RegistrationEvent) + Send + Sync>>,
    on_notification: Option<Arc<dyn Fn(NotificationEvent) + Send + Sync>>,
    // Stored but never read: nothing in the facade raises toward it yet.
    #[allow(dead_code)]
    on_error: Option<Arc<dyn Fn(BridgeError) + Send + Sync>>,
}

/// State shared between the facade handle, the listeners it plants on the
/// bridge, and any in-flight permission task.
struct FacadeInner<B, S> {
    bridge: B,
    app_state: S,
    platform: Platform,
    configured: Mutex<bool>,
    permission_request_in_flight: AtomicBool,
    callbacks: Mutex<CallbackSet>,
    permissions: Mutex<PermissionPreferences>,
    sender_id: Mutex<Option<String>>,
}

/// Cross-platform notification facade.
///
/// Sits between one platform's native notification module and the embedding
/// application: it subscribes to the bridge's `register` and `notification`
/// events at most once over its lifetime, normalizes every payload into
/// [`NotificationEvent`], and funnels configure-time permission requests
/// through a single-flight guard so the OS prompt is never stacked.
///
/// The handle is cheap to clone; clones share all state.
pub struct Notifications<B, S> {
    inner: Arc<FacadeInner<B, S>>,
}

impl<B, S> Clone for Notifications<B, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, S> Notifications<B, S>
where
    B: NativeBridge + 'static,
    S: AppStateSource + 'static,
{
    /// Create a facade over the given bridge and app-state source
    pub fn new(bridge: B, app_state: S) -> Self {
        let platform = bridge.platform();
        Self {
            inner: Arc::new(FacadeInner {
                bridge,
                app_state,
                platform,
                configured: Mutex::new(false),
                permission_request_in_flight: AtomicBool::new(false),
                callbacks: Mutex::new(CallbackSet::default()),
                permissions: Mutex::new(PermissionPreferences::default()),
                sender_id: Mutex::new(None),
            }),
        }
    }

    /// The platform this facade fronts
    pub fn platform(&self) -> Platform {
        self.inner.platform
    }

    /// Whether a configure call has already attached the event listeners
    pub fn is_configured(&self) -> bool {
        *self.inner.configured.lock().unwrap()
    }

    /// Configure callbacks and kick off platform registration.
    ///
    /// Safe to call repeatedly: supplied callbacks and preferences replace
    /// the stored ones on every call, while the bridge listeners are only
    /// attached on the first call. The first call also replays the
    /// notification that launched the process (unless
    /// `pop_initial_notification` is false), delivering it as a
    /// background-originated event before anything live. Each call triggers
    /// the permission flow unless `request_permissions` is false.
    ///
    /// # Errors
    /// Fails when the bridge rejects listener attachment or the
    /// initial-notification lookup with a real error. A bridge that simply
    /// lacks one of those capabilities is skipped silently.
    pub async fn configure(&self, options: ConfigureOptions) -> Result<(), BridgeError> {
        let ConfigureOptions {
            on_register,
            on_notification,
            on_error,
            permissions,
            sender_id,
            request_permissions,
            pop_initial_notification,
        } = options;

        {
            let mut callbacks = self.inner.callbacks.lock().unwrap();
            if let Some(callback) = on_register {
                callbacks.on_register = Some(Arc::from(callback));
            }
            if let Some(callback) = on_notification {
                callbacks.on_notification = Some(Arc::from(callback));
            }
            if let Some(callback) = on_error {
                callbacks.on_error = Some(Arc::from(callback));
            }
        }
        if let Some(preferences) = permissions {
            *self.inner.permissions.lock().unwrap() = preferences;
        }
        if let Some(id) = sender_id {
            *self.inner.sender_id.lock().unwrap() = Some(id);
        }

        let first_configure = {
            let mut configured = self.inner.configured.lock().unwrap();
            if *configured {
                false
            } else {
                self.attach_listeners()?;
                *configured = true;
                true
            }
        };

        if first_configure && pop_initial_notification {
            self.pop_initial_notification(|first| {
                if let Some(raw) = first {
                    self.inner.deliver_notification(raw, Some(true));
                }
            })
            .await?;
        }

        if request_permissions {
            self.spawn_permission_request();
        }

        Ok(())
    }

    /// Remove both event subscriptions from the bridge.
    ///
    /// Safe to call even if `configure` never ran. Does not reset the
    /// configured flag, so a later `configure` will not re-attach.
    pub fn unregister(&self) {
        self.remove_listeners(&[NativeEvent::Register, NativeEvent::Notification]);
    }

    /// Ask the platform for permissions right now, outside the
    /// configure-time single-flight guard.
    ///
    /// Returns `Ok(None)` when the platform has no permission operation, or
    /// when it registers against a sender identifier and none is configured.
    pub async fn request_permissions(&self) -> Result<Option<PermissionStatus>, BridgeError> {
        let request = match self.inner.platform.permission_model() {
            PermissionModel::Prompt => {
                PermissionRequest::Capabilities(self.inner.permission_preferences())
            }
            PermissionModel::SenderId => match self.inner.sender_id_value() {
                Some(sender_id) => PermissionRequest::SenderId(sender_id),
                None => {
                    log::debug!("No sender identifier configured; not requesting permissions");
                    return Ok(None);
                }
            },
        };
        capability_or_none(self.inner.bridge.request_permissions(request).await)
    }

    /// Report the permission set currently granted, or `Ok(None)` when the
    /// platform cannot say
    pub async fn check_permissions(&self) -> Result<Option<PermissionStatus>, BridgeError> {
        capability_or_none(self.inner.bridge.check_permissions().await)
    }

    /// Relinquish the push registration, or `Ok(None)` when the platform
    /// has nothing to abandon
    pub fn abandon_permissions(&self) -> Result<Option<()>, BridgeError> {
        capability_or_none(self.inner.bridge.abandon_permissions())
    }

    /// Fetch the notification that launched the process and hand it to
    /// `handler`.
    ///
    /// The handler always runs when the platform supports the lookup,
    /// receiving `None` when nothing launched the app. On a platform
    /// without the capability the handler is not invoked at all.
    pub async fn pop_initial_notification<F>(&self, handler: F) -> Result<(), BridgeError>
    where
        F: FnOnce(Option<RawNotification>),
    {
        match self.inner.bridge.initial_notification().await {
            Ok(first) => {
                handler(first);
                Ok(())
            }
            Err(BridgeError::Unsupported(operation)) => {
                log::debug!("Bridge has no {}; skipping initial notification", operation);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Set the app icon badge counter, or `Ok(None)` on platforms without
    /// badge support
    pub fn set_application_icon_badge_number(
        &self,
        count: u32,
    ) -> Result<Option<()>, BridgeError> {
        capability_or_none(self.inner.bridge.set_badge_count(count))
    }

    /// Read the app icon badge counter, or `Ok(None)` on platforms without
    /// badge support
    pub async fn application_icon_badge_number(&self) -> Result<Option<u32>, BridgeError> {
        capability_or_none(self.inner.bridge.badge_count().await)
    }

    /// Plant the two bridge listeners that feed the consumer callbacks
    fn attach_listeners(&self) -> Result<(), BridgeError> {
        let inner = Arc::clone(&self.inner);
        let register = EventListener::Register(Box::new(move |token| {
            inner.deliver_registration(token);
        }));
        let inner = Arc::clone(&self.inner);
        let notification = EventListener::Notification(Box::new(move |raw| {
            inner.deliver_notification(raw, None);
        }));

        let mut attached = Vec::new();
        for listener in [register, notification] {
            let event = listener.event();
            match self.inner.bridge.add_event_listener(listener) {
                Ok(()) => attached.push(event),
                Err(BridgeError::Unsupported(_)) => {
                    // A bridge without an emitter simply never delivers.
                }
                Err(err) => {
                    log::warn!("Failed to attach {} listener: {}", event.as_str(), err);
                    // A later configure retries attachment from scratch, so
                    // nothing may stay half-attached.
                    self.remove_listeners(&attached);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn remove_listeners(&self, events: &[NativeEvent]) {
        for event in events {
            match self.inner.bridge.remove_event_listener(*event) {
                Ok(()) | Err(BridgeError::Unsupported(_)) => {}
                Err(err) => {
                    log::warn!("Failed to remove {} listener: {}", event.as_str(), err);
                }
            }
        }
    }

    /// Run the configure-time permission flow for the current platform
    fn spawn_permission_request(&self) {
        match self.inner.platform.permission_model() {
            PermissionModel::Prompt => {
                let guard_taken = self
                    .inner
                    .permission_request_in_flight
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok();
                if !guard_taken {
                    log::debug!("Permission request already pending; not issuing another");
                    return;
                }
                let preferences = self.inner.permission_preferences();
                let inner = Arc::clone(&self.inner);
                // The granted set is dropped on purpose: configure-time
                // requests exist to put the OS prompt on screen, nothing
                // more. Callers that need the outcome use
                // request_permissions() directly.
                tokio::spawn(async move {
                    let outcome = inner
                        .bridge
                        .request_permissions(PermissionRequest::Capabilities(preferences))
                        .await;
                    if let Err(err) = outcome {
                        log::debug!("Permission request settled with error: {}", err);
                    }
                    inner
                        .permission_request_in_flight
                        .store(false, Ordering::SeqCst);
                });
            }
            PermissionModel::SenderId => {
                let Some(sender_id) = self.inner.sender_id_value() else {
                    log::debug!("No sender identifier configured; skipping registration");
                    return;
                };
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    if let Err(err) = inner
                        .bridge
                        .request_permissions(PermissionRequest::SenderId(sender_id))
                        .await
                    {
                        log::debug!("Token registration settled with error: {}", err);
                    }
                });
            }
        }
    }
}

impl<B, S> FacadeInner<B, S>
where
    B: NativeBridge,
    S: AppStateSource,
{
    fn deliver_registration(&self, token: DeviceToken) {
        let callback = match self.callbacks.lock() {
            Ok(callbacks) => callbacks.on_register.clone(),
            Err(_) => None,
        };
        if let Some(callback) = callback {
            callback(RegistrationEvent {
                token,
                platform: self.platform,
            });
        }
    }

    fn deliver_notification(&self, raw: RawNotification, background_hint: Option<bool>) {
        let callback = match self.callbacks.lock() {
            Ok(callbacks) => callbacks.on_notification.clone(),
            Err(_) => None,
        };
        let Some(callback) = callback else {
            return;
        };
        let event = normalize(raw, self.app_state.current_state(), background_hint);
        callback(event);
    }

    fn permission_preferences(&self) -> PermissionPreferences {
        *self.permissions.lock().unwrap()
    }

    fn sender_id_value(&self) -> Option<String> {
        self.sender_id.lock().unwrap().clone()
    }
}

/// Map "the bridge has no such operation" to an absent result, keeping
/// every other failure intact. Facade passthroughs degrade this way so a
/// platform missing some capability never turns a call into an error.
fn capability_or_none<T>(result: Result<T, BridgeError>) -> Result<Option<T>, BridgeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(BridgeError::Unsupported(operation)) => {
            log::debug!("Bridge has no {}; treating result as absent", operation);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
