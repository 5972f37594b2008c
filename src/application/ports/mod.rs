//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod app_state;
pub mod bridge;

// Re-export common types
pub use app_state::AppStateSource;
pub use bridge::{BridgeError, EventListener, NativeBridge, NativeEvent};
