//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: in-memory
//! bridges standing in for a platform's native module, and app-state
//! sources the host keeps current.

pub mod app_state;
pub mod bridge;

// Re-export adapters
pub use app_state::SharedAppState;
pub use bridge::{InProcessBridge, NoOpBridge};
