//! Shared app lifecycle state source

use std::sync::{Arc, Mutex};

use crate::application::ports::AppStateSource;
use crate::domain::AppState;

/// App state slot the host updates as the OS moves the application
/// between foreground and background; clones share the same slot.
#[derive(Clone)]
pub struct SharedAppState {
    state: Arc<Mutex<AppState>>,
}

impl SharedAppState {
    /// Create a source starting in the given state
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// Record a lifecycle transition
    pub fn set(&self, state: AppState) {
        if let Ok(mut current) = self.state.lock() {
            *current = state;
        }
    }
}

impl Default for SharedAppState {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl AppStateSource for SharedAppState {
    fn current_state(&self) -> AppState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(AppState::Active)
    }
}
