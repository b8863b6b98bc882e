//! Built-in non-player decision policies.
//!
//! Every policy reads the state and returns at most one intent; none of them
//! mutate anything, so they can be asked speculatively.

use game_core::{
    Action, ActorState, AiMode, BumpAction, Direction, EntityId, GameEnv, GameState,
    MeleeAction, MoveAction, WaitAction, compute_seed,
};
use tracing::trace;

use crate::api::DecisionProvider;

/// Seed context for the confused wander roll.
const WANDER_CONTEXT: u32 = 1;

/// Chases the player while the player can see it.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostileAi;

impl HostileAi {
    fn plan(&self, npc: &ActorState, state: &GameState, env: &GameEnv<'_>) -> Action {
        let wait = Action::from(WaitAction::new(npc.id));
        let player = state.player();

        if !player.is_alive()
            || player.floor != npc.floor
            || !state.world.is_visible(npc.position)
        {
            return wait;
        }

        let distance = npc.position.chebyshev(player.position);
        if distance == 1 {
            if let Some(direction) = Direction::toward(npc.position, player.position) {
                return MeleeAction::new(npc.id, direction).into();
            }
        }

        let Ok(map) = env.map() else {
            return wait;
        };

        // Greedy step: first direction (in Direction::ALL order) with the
        // smallest resulting distance, provided it actually closes in.
        let mut best: Option<(u32, Direction)> = None;
        for direction in Direction::ALL {
            let destination = npc.position.offset(direction);
            if !state.can_enter(map, npc.floor, destination) {
                continue;
            }
            let remaining = destination.chebyshev(player.position);
            if remaining < distance && best.is_none_or(|(current, _)| remaining < current) {
                best = Some((remaining, direction));
            }
        }

        match best {
            Some((_, direction)) => MoveAction::new(npc.id, direction).into(),
            None => wait,
        }
    }
}

impl DecisionProvider for HostileAi {
    fn decide(&self, actor: EntityId, state: &GameState, env: &GameEnv<'_>) -> Option<Action> {
        let npc = state.entities.actor(actor).filter(|npc| npc.is_alive())?;
        Some(self.plan(npc, state, env))
    }
}

/// Stumbles around at random.
///
/// Picks uniformly among directions whose bump is currently valid, so a
/// confused actor may attack whoever stands next to it, player included.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfusedAi;

impl DecisionProvider for ConfusedAi {
    fn decide(&self, actor: EntityId, state: &GameState, env: &GameEnv<'_>) -> Option<Action> {
        let npc = state.entities.actor(actor).filter(|npc| npc.is_alive())?;
        let wait = Action::from(WaitAction::new(npc.id));

        let Ok(rng) = env.rng() else {
            return Some(wait);
        };

        let options: Vec<Action> = Direction::ALL
            .into_iter()
            .map(|direction| Action::from(BumpAction::new(npc.id, direction)))
            .filter(|bump| bump.is_valid(state, env))
            .collect();
        if options.is_empty() {
            return Some(wait);
        }

        let seed = compute_seed(state.game_seed, state.nonce, npc.id.0, WANDER_CONTEXT);
        let index = rng.below(seed, options.len() as u32) as usize;
        options.into_iter().nth(index).or(Some(wait))
    }
}

/// Dispatches to the policy selected by each actor's [`AiMode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NpcBrain {
    hostile: HostileAi,
    confused: ConfusedAi,
}

impl NpcBrain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionProvider for NpcBrain {
    fn decide(&self, actor: EntityId, state: &GameState, env: &GameEnv<'_>) -> Option<Action> {
        let mode = state.entities.actor(actor)?.ai;
        let decision = match mode {
            AiMode::Player => None,
            AiMode::Hostile => self.hostile.decide(actor, state, env),
            AiMode::Confused { .. } => self.confused.decide(actor, state, env),
        };
        trace!(
            target: "runtime::ai",
            actor = %actor,
            mode = ?mode,
            decision = decision.as_ref().map(Action::kind),
            "decided"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::oracle::{ItemOracleImpl, MapOracleImpl, OracleBundle};
    use game_core::{EntitiesState, Position, WorldState};

    const HALL: &[&str] = &[
        "#########", //
        "#.......#", //
        "#.......#", //
        "#..#....#", //
        "#########",
    ];

    fn oracles() -> OracleBundle {
        OracleBundle::new(MapOracleImpl::from_ascii(&[HALL]), ItemOracleImpl::standard())
    }

    fn state(npc: ActorState, visible: bool) -> GameState {
        let player = ActorState::player("Player", Position::new(1, 1), 30);
        let mut world = WorldState::new(0);
        if visible {
            let all: BTreeSet<Position> = (0..9)
                .flat_map(|x| (0..5).map(move |y| Position::new(x, y)))
                .collect();
            world.update_visibility(all);
        }
        GameState::new(3, EntitiesState::new(player, vec![npc], Vec::new()), world)
    }

    fn goblin(position: Position) -> ActorState {
        ActorState::new(EntityId(1), "goblin", position, 8)
    }

    #[test]
    fn hostile_attacks_when_adjacent() {
        let oracles = oracles();
        let env = oracles.as_game_env();
        let state = state(goblin(Position::new(2, 2)), true);

        let action = HostileAi.decide(EntityId(1), &state, &env);
        assert_eq!(
            action,
            Some(MeleeAction::new(EntityId(1), Direction::NorthWest).into())
        );
    }

    #[test]
    fn hostile_steps_toward_player() {
        let oracles = oracles();
        let env = oracles.as_game_env();
        let state = state(goblin(Position::new(5, 1)), true);

        let action = HostileAi.decide(EntityId(1), &state, &env);
        assert_eq!(action, Some(MoveAction::new(EntityId(1), Direction::West).into()));
    }

    #[test]
    fn hostile_waits_when_unseen() {
        let oracles = oracles();
        let env = oracles.as_game_env();
        let state = state(goblin(Position::new(5, 1)), false);

        let action = HostileAi.decide(EntityId(1), &state, &env);
        assert_eq!(action, Some(WaitAction::new(EntityId(1)).into()));
    }

    #[test]
    fn confused_wander_is_valid_and_deterministic() {
        let oracles = oracles();
        let env = oracles.as_game_env();
        let npc = goblin(Position::new(5, 2)).with_ai(AiMode::Confused { turns_remaining: 3 });
        let state = state(npc, true);

        let first = ConfusedAi.decide(EntityId(1), &state, &env).unwrap();
        let second = ConfusedAi.decide(EntityId(1), &state, &env).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, Action::Bump(_)));
        assert!(first.is_valid(&state, &env));
    }

    #[test]
    fn brain_skips_player_and_dead() {
        let oracles = oracles();
        let env = oracles.as_game_env();
        let mut corpse = goblin(Position::new(5, 1));
        corpse.health.current = 0;
        let state = state(corpse, true);

        assert_eq!(NpcBrain::new().decide(EntityId::PLAYER, &state, &env), None);
        assert_eq!(NpcBrain::new().decide(EntityId(1), &state, &env), None);
    }
}
