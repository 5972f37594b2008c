//! Unipush - cross-platform push notification facade
//!
//! This crate sits between an application and whichever native notification
//! module its platform provides. It normalizes registration and notification
//! events into one canonical shape, de-duplicates permission prompts, and
//! degrades silently on platforms missing a capability.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Platform descriptors, payload types, and the normalization rules
//! - **Application**: The [`Notifications`](application::Notifications) facade and port interfaces (traits)
//! - **Infrastructure**: In-process bridge adapters and app-state sources
//!
//! # Example
//!
//! ```
//! use unipush::application::{ConfigureOptions, Notifications};
//! use unipush::domain::Platform;
//! use unipush::infrastructure::{InProcessBridge, SharedAppState};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), unipush::application::ports::BridgeError> {
//! let bridge = InProcessBridge::new(Platform::Android);
//! let facade = Notifications::new(bridge.clone(), SharedAppState::default());
//!
//! facade
//!     .configure(ConfigureOptions {
//!         on_notification: Some(Box::new(|event| {
//!             println!("got: {:?}", event.message);
//!         })),
//!         sender_id: Some("sender-id".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
