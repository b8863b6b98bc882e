//! Wears status conditions off as their owners act.

use game_core::{AiMode, EntityId, GameEnv, GameState, MessageSink, MessageStyle};
use tracing::debug;

use super::{HookError, PostTurnHook};

/// Counts down confusion after each action by a confused actor.
pub struct ConfusionHook;

impl PostTurnHook for ConfusionHook {
    fn name(&self) -> &'static str {
        "confusion"
    }

    fn after_npc_action(
        &self,
        actor: EntityId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<(), HookError> {
        let npc = state
            .entities
            .actor_mut(actor)
            .ok_or(HookError::ActorNotFound(actor))?;

        let AiMode::Confused { turns_remaining } = npc.ai else {
            return Ok(());
        };

        let turns_remaining = turns_remaining.saturating_sub(1);
        if turns_remaining == 0 {
            npc.ai = AiMode::Hostile;
            debug!(target: "runtime::hooks", actor = %actor, "confusion wore off");
            sink.add_message(
                format!("The {} is no longer confused.", npc.name),
                MessageStyle::StatusEffect,
            );
        } else {
            npc.ai = AiMode::Confused { turns_remaining };
        }
        Ok(())
    }
}
