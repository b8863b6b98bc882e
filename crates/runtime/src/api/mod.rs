//! Public API surface for runtime consumers.
//!
//! Re-exports the error type and the traits clients implement to feed the
//! session with player commands and non-player decisions.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{DecisionProvider, InputSource, PlayerCommand, ScriptedInput, WaitProvider};
