//! Turn orchestration.
//!
//! One [`TurnOrchestrator::submit`] call resolves a whole player turn:
//!
//! 1. schedule the player's intent with its delay
//! 2. ask for intents from living non-player actors on the player's floor that
//!    have nothing pending
//! 3. drain every non-player intent due before the player's
//! 4. pop and execute the player's intent
//!
//! The orchestrator is the only writer of the [`TurnSchedule`].

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use game_core::{
    Action, ActionError, ActionOutcome, EntityId, ErrorSeverity, GameEnv, GameError, GameState,
    MessageSink, MessageStyle, ScheduledAction, Tick, TurnSchedule,
};

use crate::api::{DecisionProvider, Result, RuntimeError};
use crate::hooks::HookRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    AwaitingPlayerInput,
    ResolvingTurn,
}

/// Everything a turn borrows from its session.
pub struct TurnContext<'a, 'env> {
    pub state: &'a mut GameState,
    pub env: GameEnv<'env>,
    pub decisions: &'a dyn DecisionProvider,
    pub sink: &'a mut dyn MessageSink,
    pub hooks: &'a HookRegistry,
}

/// How a submitted player intent ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnReport {
    /// The world refused the intent. No time passed for the player.
    Rejected { error: ActionError },
    Completed { delay: Tick, outcome: ActionOutcome },
    /// The player died, either during the drain or by their own action.
    PlayerDied,
}

impl TurnReport {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnReport::Completed { .. })
    }
}

/// Serializable orchestrator state. Restoring it reproduces pending intents,
/// their priorities, identities and tie order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorSnapshot {
    pub schedule: TurnSchedule,
    pub elapsed: Tick,
}

#[derive(Debug, Default)]
pub struct TurnOrchestrator {
    schedule: TurnSchedule,
    /// Sum of the delays of completed player turns.
    elapsed: Tick,
    phase: TurnPhase,
}

impl TurnOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: OrchestratorSnapshot) -> Self {
        Self {
            schedule: snapshot.schedule,
            elapsed: snapshot.elapsed,
            phase: TurnPhase::AwaitingPlayerInput,
        }
    }

    pub fn snapshot(&self) -> OrchestratorSnapshot {
        OrchestratorSnapshot {
            schedule: self.schedule.clone(),
            elapsed: self.elapsed,
        }
    }

    pub fn schedule(&self) -> &TurnSchedule {
        &self.schedule
    }

    pub fn elapsed(&self) -> Tick {
        self.elapsed
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Resolves one player turn.
    ///
    /// Recoverable failures of the player's intent come back as
    /// [`TurnReport::Rejected`]; everything else that goes wrong is fatal.
    pub fn submit(&mut self, ctx: &mut TurnContext<'_, '_>, action: Action) -> Result<TurnReport> {
        if action.actor() != EntityId::PLAYER {
            return Err(RuntimeError::InvalidActionActor {
                expected: EntityId::PLAYER,
                provided: action.actor(),
            });
        }
        if !ctx.state.player().is_alive() {
            return Ok(TurnReport::PlayerDied);
        }

        self.phase = TurnPhase::ResolvingTurn;
        let report = self.resolve(ctx, action);
        self.phase = TurnPhase::AwaitingPlayerInput;
        report
    }

    fn resolve(&mut self, ctx: &mut TurnContext<'_, '_>, action: Action) -> Result<TurnReport> {
        let delay = action.take_delay(ctx.state).ok_or(RuntimeError::PlayerMissing)?;
        debug!(
            target: "runtime::orchestrator",
            actor = %EntityId::PLAYER,
            action = action.kind(),
            priority = %delay,
            "scheduling player intent"
        );
        self.schedule.schedule(Some(action), delay);

        self.request_decisions(ctx)?;

        while !self.player_is_next()? {
            let scheduled = self.schedule.advance()?;
            self.resolve_npc(ctx, scheduled)?;

            if !ctx.state.player().is_alive() {
                self.schedule.cancel_actor(EntityId::PLAYER);
                debug!(target: "runtime::orchestrator", "player died before acting");
                return Ok(TurnReport::PlayerDied);
            }
        }

        let ScheduledAction { action, .. } = self.schedule.advance()?;
        match action.execute(ctx.state, &ctx.env, ctx.sink) {
            Ok(outcome) => {
                self.elapsed += delay;
                debug!(
                    target: "runtime::orchestrator",
                    actor = %EntityId::PLAYER,
                    action = action.kind(),
                    elapsed = %self.elapsed,
                    "player intent executed"
                );

                if let ActionOutcome::FloorChanged { depth } = outcome {
                    let cancelled = self.schedule.retain_actors(EntityId::is_player);
                    debug!(
                        target: "runtime::orchestrator",
                        depth,
                        cancelled,
                        "floor changed, dropped pending intents"
                    );
                }

                ctx.hooks.run_after_player(ctx.state, &ctx.env, ctx.sink)?;

                if !ctx.state.player().is_alive() {
                    return Ok(TurnReport::PlayerDied);
                }
                Ok(TurnReport::Completed { delay, outcome })
            }
            Err(error) if error.is_recoverable() => {
                warn!(
                    target: "runtime::orchestrator",
                    action = action.kind(),
                    code = error.error_code(),
                    "player intent rejected: {error}"
                );
                ctx.sink.add_message(error.to_string(), MessageStyle::Impossible);
                Ok(TurnReport::Rejected { error })
            }
            Err(error) => {
                error!(
                    target: "runtime::orchestrator",
                    action = action.kind(),
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "player intent failed: {error}"
                );
                Err(RuntimeError::Action(error))
            }
        }
    }

    /// Keeps one outstanding intent per living actor on the player's floor.
    fn request_decisions(&mut self, ctx: &mut TurnContext<'_, '_>) -> Result<()> {
        let floor = ctx.state.player().floor;
        let idle: Vec<EntityId> = ctx
            .state
            .entities
            .living_npcs_on(floor)
            .map(|npc| npc.id)
            .filter(|id| !self.schedule.has_pending(*id))
            .collect();

        for actor in idle {
            let Some(intent) = ctx.decisions.decide(actor, ctx.state, &ctx.env) else {
                debug!(target: "runtime::orchestrator", actor = %actor, "no intent this cycle");
                continue;
            };
            if intent.actor() != actor {
                return Err(RuntimeError::InvalidActionActor {
                    expected: actor,
                    provided: intent.actor(),
                });
            }
            let Some(delay) = intent.take_delay(ctx.state) else {
                continue;
            };
            debug!(
                target: "runtime::orchestrator",
                actor = %actor,
                action = intent.kind(),
                priority = %delay,
                "scheduling intent"
            );
            self.schedule.schedule(Some(intent), delay);
        }
        Ok(())
    }

    fn player_is_next(&self) -> Result<bool> {
        self.schedule
            .peek_owner()
            .map(EntityId::is_player)
            .ok_or(RuntimeError::EmptySchedule)
    }

    /// Executes one non-player intent. Stale intents are dropped without a
    /// re-decision; the actor loses the slot it had claimed.
    fn resolve_npc(
        &mut self,
        ctx: &mut TurnContext<'_, '_>,
        scheduled: ScheduledAction,
    ) -> Result<()> {
        let ScheduledAction {
            action, elapsed, ..
        } = scheduled;
        let actor = action.actor();

        if let Err(error) = action.validate(ctx.state, &ctx.env) {
            if error.severity() == ErrorSeverity::Fatal {
                error!(
                    target: "runtime::orchestrator",
                    actor = %actor,
                    "intent validation failed: {error}"
                );
                return Err(RuntimeError::Action(error));
            }
            debug!(
                target: "runtime::orchestrator",
                actor = %actor,
                action = action.kind(),
                priority = %elapsed,
                code = error.error_code(),
                "discarding stale intent"
            );
            return Ok(());
        }

        match action.execute(ctx.state, &ctx.env, ctx.sink) {
            Ok(outcome) => {
                debug!(
                    target: "runtime::orchestrator",
                    actor = %actor,
                    action = action.kind(),
                    priority = %elapsed,
                    outcome = ?outcome,
                    "intent executed"
                );
                ctx.hooks.run_after_npc(actor, ctx.state, &ctx.env, ctx.sink)
            }
            // Validation passed just above, so this arm only fires if `apply`
            // rejects what `validate` accepted. The failure is still narrated.
            Err(error) if error.is_recoverable() => {
                ctx.sink.add_message(error.to_string(), MessageStyle::Impossible);
                Ok(())
            }
            Err(error) => {
                error!(target: "runtime::orchestrator", actor = %actor, "intent failed: {error}");
                Err(RuntimeError::Action(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WaitProvider;
    use crate::oracle::{ItemOracleImpl, MapOracleImpl, OracleBundle};
    use game_core::{
        ActorState, Direction, EntitiesState, Message, MoveAction, Position, Speed, WaitAction,
        WorldState,
    };

    fn oracles() -> OracleBundle {
        OracleBundle::new(
            MapOracleImpl::from_ascii(&[&["#######", "#.....#", "#.....#", "#######"]]),
            ItemOracleImpl::standard(),
        )
    }

    fn state(npcs: Vec<ActorState>) -> GameState {
        let player = ActorState::player("Player", Position::new(1, 1), 30);
        GameState::new(9, EntitiesState::new(player, npcs, Vec::new()), WorldState::new(0))
    }

    #[test]
    fn rejects_intents_for_other_actors() {
        let oracles = oracles();
        let mut state = state(Vec::new());
        let mut log = Vec::<Message>::new();
        let hooks = HookRegistry::empty();
        let mut ctx = TurnContext {
            state: &mut state,
            env: oracles.as_game_env(),
            decisions: &WaitProvider,
            sink: &mut log,
            hooks: &hooks,
        };

        let mut orchestrator = TurnOrchestrator::new();
        let err = orchestrator
            .submit(&mut ctx, WaitAction::new(EntityId(3)).into())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidActionActor { .. }));
        assert!(orchestrator.schedule().is_empty());
    }

    #[test]
    fn npcs_are_asked_only_when_idle() {
        let oracles = oracles();
        let imp = ActorState::new(EntityId(1), "imp", Position::new(5, 2), 5)
            .with_speed(Speed::new(20).unwrap());
        let slug = ActorState::new(EntityId(2), "slug", Position::new(5, 1), 5)
            .with_speed(Speed::new(5).unwrap());
        let mut state = state(vec![imp, slug]);
        let mut log = Vec::<Message>::new();
        let hooks = HookRegistry::empty();
        let mut orchestrator = TurnOrchestrator::new();

        let mut nonces = Vec::new();
        for _ in 0..3 {
            let mut ctx = TurnContext {
                state: &mut state,
                env: oracles.as_game_env(),
                decisions: &WaitProvider,
                sink: &mut log,
                hooks: &hooks,
            };
            let report = orchestrator
                .submit(&mut ctx, WaitAction::new(EntityId::PLAYER).into())
                .unwrap();
            assert_eq!(
                report,
                TurnReport::Completed {
                    delay: Tick(10),
                    outcome: ActionOutcome::Performed
                }
            );
            assert_eq!(orchestrator.phase(), TurnPhase::AwaitingPlayerInput);
            nonces.push(state.nonce);
        }

        // The slug's delay (20) outlasts one player turn, so it is not asked
        // again while its intent is pending and acts every other turn.
        assert_eq!(nonces, vec![2, 5, 7]);
        assert_eq!(orchestrator.elapsed(), Tick(30));
        assert_eq!(orchestrator.schedule().len(), 1);
        assert!(orchestrator.schedule().has_pending(EntityId(2)));
    }

    #[test]
    fn wall_bump_costs_no_time() {
        let oracles = oracles();
        let mut state = state(Vec::new());
        let mut log = Vec::<Message>::new();
        let hooks = HookRegistry::empty();
        let mut ctx = TurnContext {
            state: &mut state,
            env: oracles.as_game_env(),
            decisions: &WaitProvider,
            sink: &mut log,
            hooks: &hooks,
        };
        let mut orchestrator = TurnOrchestrator::new();

        let report = orchestrator
            .submit(&mut ctx, MoveAction::new(EntityId::PLAYER, Direction::North).into())
            .unwrap();
        assert!(matches!(report, TurnReport::Rejected { .. }));
        assert_eq!(orchestrator.elapsed(), Tick::ZERO);
        assert!(orchestrator.schedule().is_empty());
        assert_eq!(log.last().map(|m| m.style), Some(MessageStyle::Impossible));
    }
}
