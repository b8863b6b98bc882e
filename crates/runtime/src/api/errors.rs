//! Unified error types surfaced by the runtime API.
//!
//! Everything here terminates the session. Recoverable action failures never
//! reach this type: the orchestrator turns them into narration.
use thiserror::Error;

use game_core::{ActionError, EntityId, QueueError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("turn schedule is empty; the player has no outstanding intent")]
    EmptySchedule,

    #[error("intent failed: {0}")]
    Action(#[source] ActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("player actor is missing from the game state")]
    PlayerMissing,

    #[error("action actor {provided} does not match expected entity {expected}")]
    InvalidActionActor {
        expected: EntityId,
        provided: EntityId,
    },

    #[error("post-turn hook '{name}' failed")]
    Hook {
        name: &'static str,
        #[source]
        source: crate::hooks::HookError,
    },

    #[error("input source failed")]
    Input(#[source] std::io::Error),

    #[error("session requires oracles to be configured before building")]
    MissingOracles,

    #[error("session requires an initial game state before building")]
    MissingState,
}

impl From<QueueError> for RuntimeError {
    fn from(error: QueueError) -> Self {
        match error {
            QueueError::Empty => RuntimeError::EmptySchedule,
        }
    }
}
