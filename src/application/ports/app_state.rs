//! App lifecycle state port interface

use crate::domain::AppState;

/// Port reporting the embedding application's lifecycle state.
///
/// Consulted at notification-delivery time to decide whether an event
/// arrived in the background when the payload itself does not say.
pub trait AppStateSource: Send + Sync {
    /// The state the app is in right now
    fn current_state(&self) -> AppState;
}
