//! Notification payloads and their normalization into one canonical shape

mod event;
mod normalize;
mod payload;

pub use event::NotificationEvent;
pub use normalize::normalize;
pub use payload::{AndroidNotification, IosNotification, RawNotification};
