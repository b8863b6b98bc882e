//! Abstractions for sourcing intents.
//!
//! Non-player intents come from a [`DecisionProvider`]; the player's come from
//! an [`InputSource`] that blocks until the user has decided.
use std::collections::VecDeque;

use game_core::{Action, EntityId, GameEnv, GameState, WaitAction};

use super::errors::Result;
use crate::messages::MessageLog;
use crate::session::SessionEnd;

/// Decides what a non-player actor wants to do next.
///
/// Returning `None` skips the actor for this cycle; it is asked again next cycle.
pub trait DecisionProvider: Send + Sync {
    fn decide(&self, actor: EntityId, state: &GameState, env: &GameEnv<'_>) -> Option<Action>;
}

/// A decision provider that always returns Wait.
/// Useful for testing or as a fallback.
pub struct WaitProvider;

impl DecisionProvider for WaitProvider {
    fn decide(&self, actor: EntityId, _state: &GameState, _env: &GameEnv<'_>) -> Option<Action> {
        Some(Action::Wait(WaitAction::new(actor)))
    }
}

/// What the player asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Act(Action),
    /// End the session. Not an error.
    Quit,
}

/// Source of player commands. The only place the session blocks.
pub trait InputSource {
    fn next_command(&mut self, state: &GameState, messages: &MessageLog) -> Result<PlayerCommand>;

    /// Called once when [`crate::Session::run`] returns normally.
    fn session_ended(&mut self, _end: SessionEnd, _state: &GameState, _messages: &MessageLog) {}
}

/// Replays a fixed list of commands, then quits.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    commands: VecDeque<PlayerCommand>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_command(
        &mut self,
        _state: &GameState,
        _messages: &MessageLog,
    ) -> Result<PlayerCommand> {
        Ok(self.commands.pop_front().unwrap_or(PlayerCommand::Quit))
    }
}
