//! Notification bridge adapters
//!
//! In-memory stand-ins for a platform's native notification module.

mod in_process;
mod noop;

pub use in_process::InProcessBridge;
pub use noop::NoOpBridge;
