//! Post-turn hook system.
//!
//! Hooks run after an intent executes successfully and keep derived world data
//! in step with the authoritative state: the player's field of view, status
//! effects that wear off, and similar bookkeeping that is not an intent itself.
//!
//! - Hooks are registered in the [`crate::SessionBuilder`] and sorted by priority
//! - `after_player_turn` runs once per completed player turn
//! - `after_npc_action` runs after every successfully executed non-player intent
//! - Failures are handled according to [`HookCriticality`]

mod condition;
mod registry;
mod visibility;

pub use condition::ConfusionHook;
pub use registry::HookRegistry;
pub use visibility::{FieldOfView, RadiusFov, VisibilityHook};

use game_core::{EntityId, GameEnv, GameState, MessageSink, OracleError};
use thiserror::Error;

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the turn fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure terminates the session.
    ///
    /// Use for hooks that keep derived state consistent (e.g., visibility).
    Critical,

    /// Hook failure is logged as an error and the turn continues.
    Important,

    /// Hook failure is logged at debug level only.
    Optional,
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),
}

/// Work to run once an intent has been applied.
///
/// Hooks are sorted by priority (lower values execute first).
pub trait PostTurnHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Runs after the player's intent executed successfully.
    fn after_player_turn(
        &self,
        _state: &mut GameState,
        _env: &GameEnv<'_>,
        _sink: &mut dyn MessageSink,
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs after a non-player intent executed successfully.
    fn after_npc_action(
        &self,
        _actor: EntityId,
        _state: &mut GameState,
        _env: &GameEnv<'_>,
        _sink: &mut dyn MessageSink,
    ) -> Result<(), HookError> {
        Ok(())
    }
}
