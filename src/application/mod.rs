//! Application layer - The facade and its port interfaces
//!
//! Contains the notification facade and trait definitions
//! for external system interactions.

pub mod facade;
pub mod ports;

// Re-export the facade surface
pub use facade::{
    ConfigureOptions, ErrorCallback, NotificationCallback, Notifications, RegistrationCallback,
};
