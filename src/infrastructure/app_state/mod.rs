//! App lifecycle state adapters

mod shared;

pub use shared::SharedAppState;
