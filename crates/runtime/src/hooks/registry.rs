//! Hook registry for managing and executing post-turn hooks.

use std::sync::Arc;

use game_core::{EntityId, GameConfig, GameEnv, GameState, MessageSink};
use tracing::{debug, error};

use super::{ConfusionHook, HookCriticality, HookError, PostTurnHook, VisibilityHook};
use crate::api::{Result, RuntimeError};

/// Registry that runs post-turn hooks in priority order.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn PostTurnHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn PostTurnHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// - VisibilityHook: recomputes the player's field of view (critical)
    /// - ConfusionHook: wears confusion off after each confused action
    pub fn default_hooks(config: &GameConfig) -> Self {
        Self::new(vec![
            Arc::new(VisibilityHook::new(config.fov_radius)) as Arc<dyn PostTurnHook>,
            Arc::new(ConfusionHook) as Arc<dyn PostTurnHook>,
        ])
    }

    pub fn run_after_player(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<()> {
        for hook in self.hooks.iter() {
            if let Err(error) = hook.after_player_turn(state, env, sink) {
                self.handle_hook_error(hook.as_ref(), error)?;
            }
        }
        Ok(())
    }

    pub fn run_after_npc(
        &self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<()> {
        for hook in self.hooks.iter() {
            if let Err(error) = hook.after_npc_action(actor, state, env, sink) {
                self.handle_hook_error(hook.as_ref(), error)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|hook| (hook.name(), hook.priority()))
    }

    /// Returns Ok(()) for Important/Optional hooks, Err for Critical hooks.
    fn handle_hook_error(&self, hook: &dyn PostTurnHook, error: HookError) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, aborting turn"
                );
                Err(RuntimeError::Hook {
                    name: hook.name(),
                    source: error,
                })
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    error = %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Env, Message, PcgRng, RngOracle};

    struct Failing(HookCriticality);

    impl PostTurnHook for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn criticality(&self) -> HookCriticality {
            self.0
        }

        fn after_player_turn(
            &self,
            state: &mut GameState,
            _env: &GameEnv<'_>,
            _sink: &mut dyn MessageSink,
        ) -> std::result::Result<(), HookError> {
            Err(HookError::ActorNotFound(state.player().id))
        }
    }

    struct Ordered(&'static str, i32);

    impl PostTurnHook for Ordered {
        fn name(&self) -> &'static str {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }
    }

    fn state() -> GameState {
        let player = game_core::ActorState::player("Player", game_core::Position::new(1, 1), 10);
        GameState::new(
            1,
            game_core::EntitiesState::new(player, Vec::new(), Vec::new()),
            game_core::WorldState::new(0),
        )
    }

    #[test]
    fn hooks_sorted_by_priority() {
        let registry = HookRegistry::new(vec![
            Arc::new(Ordered("late", 10)) as Arc<dyn PostTurnHook>,
            Arc::new(Ordered("early", -5)) as Arc<dyn PostTurnHook>,
        ]);
        let names: Vec<_> = registry.hooks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn only_critical_failures_propagate() {
        let rng = PcgRng;
        let env: GameEnv<'_> = Env::new(None, None, Some(&rng as &dyn RngOracle));
        let mut state = state();
        let mut sink = Vec::<Message>::new();

        let important = HookRegistry::new(vec![Arc::new(Failing(HookCriticality::Important))]);
        assert!(important.run_after_player(&mut state, &env, &mut sink).is_ok());

        let critical = HookRegistry::new(vec![Arc::new(Failing(HookCriticality::Critical))]);
        let err = critical.run_after_player(&mut state, &env, &mut sink).unwrap_err();
        assert!(matches!(err, RuntimeError::Hook { name: "failing", .. }));
    }
}
