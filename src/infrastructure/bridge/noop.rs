//! No-op notification bridge
//!
//! Used when no native module is wired up. Every capability reports
//! itself as absent, so the facade degrades to silence everywhere.

use async_trait::async_trait;

use crate::application::ports::NativeBridge;
use crate::domain::Platform;

/// Bridge with no capabilities beyond naming its platform
pub struct NoOpBridge {
    platform: Platform,
}

impl NoOpBridge {
    /// Create a new no-op bridge
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl NativeBridge for NoOpBridge {
    fn platform(&self) -> Platform {
        self.platform
    }
}
