//! Melee and the contextual bump.

use crate::action::{
    ActionError, ActionOutcome, ActionTransition, MoveAction, actor_mut, capitalize, living_actor,
};
use crate::env::{GameEnv, ItemKind};
use crate::narration::{MessageSink, MessageStyle};
use crate::state::{ActorState, Direction, EntityId, GameState};

/// Attack whatever living actor stands in the adjacent tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleeAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MeleeAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn target<'s>(&self, state: &'s GameState) -> Result<&'s ActorState, ActionError> {
        let attacker = living_actor(state, self.actor)?;
        let destination = attacker.position.offset(self.direction);
        state
            .entities
            .living_actor_at(attacker.floor, destination)
            .ok_or(ActionError::NothingToAttack { destination })
    }
}

impl ActionTransition for MeleeAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        self.target(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let attacker = living_actor(state, self.actor)?;
        let power = attack_power(attacker, env)?;
        let style = if attacker.is_player() {
            MessageStyle::PlayerAttack
        } else {
            MessageStyle::EnemyAttack
        };
        let description = format!("{} attacks", capitalize(&attacker.name));

        let target = self.target(state)?;
        let target_id = target.id;
        let damage = power.saturating_sub(defense_value(target, env)?);
        let description = format!("{description} {}", target.name);

        if damage == 0 {
            sink.add_message(format!("{description} but does no damage."), style);
            return Ok(ActionOutcome::NoEffect);
        }
        sink.add_message(format!("{description} for {damage} hit points."), style);
        inflict_damage(state, target_id, damage, sink)?;
        Ok(ActionOutcome::Performed)
    }
}

/// Attack if the destination holds a living actor, otherwise move there.
///
/// Resolved each time it is validated or applied, never at construction, so
/// the decision reflects the world at the moment the intent becomes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpAction {
    pub actor: EntityId,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpResolution {
    Melee(MeleeAction),
    Move(MoveAction),
}

impl BumpAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    pub fn resolve(&self, state: &GameState) -> Result<BumpResolution, ActionError> {
        let actor = living_actor(state, self.actor)?;
        let destination = actor.position.offset(self.direction);
        if state
            .entities
            .living_actor_at(actor.floor, destination)
            .is_some()
        {
            Ok(BumpResolution::Melee(MeleeAction::new(self.actor, self.direction)))
        } else {
            Ok(BumpResolution::Move(MoveAction::new(self.actor, self.direction)))
        }
    }
}

impl ActionTransition for BumpAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        match self.resolve(state)? {
            BumpResolution::Melee(melee) => melee.validate(state, env),
            BumpResolution::Move(step) => step.validate(state, env),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        match self.resolve(state)? {
            BumpResolution::Melee(melee) => melee.apply(state, env, sink),
            BumpResolution::Move(step) => step.apply(state, env, sink),
        }
    }
}

/// Base power plus the equipped weapon's bonus.
pub(crate) fn attack_power(actor: &ActorState, env: &GameEnv<'_>) -> Result<u32, ActionError> {
    let bonus = match actor.equipment.weapon {
        Some(handle) => match env.item(handle)?.kind {
            ItemKind::Weapon { power_bonus } => power_bonus,
            _ => 0,
        },
        None => 0,
    };
    Ok(actor.power + bonus)
}

/// Base defense plus the equipped armor's bonus.
pub(crate) fn defense_value(actor: &ActorState, env: &GameEnv<'_>) -> Result<u32, ActionError> {
    let bonus = match actor.equipment.armor {
        Some(handle) => match env.item(handle)?.kind {
            ItemKind::Armor { defense_bonus } => defense_bonus,
            _ => 0,
        },
        None => 0,
    };
    Ok(actor.defense + bonus)
}

/// Removes health from `target`, narrating its death. Returns true if this killed it.
pub(crate) fn inflict_damage(
    state: &mut GameState,
    target: EntityId,
    amount: u32,
    sink: &mut dyn MessageSink,
) -> Result<bool, ActionError> {
    let actor = actor_mut(state, target)?;
    if !actor.is_alive() {
        return Ok(false);
    }
    actor.health.drain(amount);
    if actor.is_alive() {
        return Ok(false);
    }

    if actor.is_player() {
        sink.add_message("You died!".to_owned(), MessageStyle::PlayerDeath);
    } else {
        sink.add_message(
            format!("{} is dead!", capitalize(&actor.name)),
            MessageStyle::EnemyDeath,
        );
        actor.name = format!("remains of {}", actor.name);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::test_support::*;
    use crate::narration::Message;
    use crate::state::{Equipment, Position};

    #[test]
    fn melee_damage_is_power_minus_defense() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(vec![orc(1, Position::new(2, 1))]);
        let mut log: Vec<Message> = Vec::new();

        let attack = MeleeAction::new(EntityId::PLAYER, Direction::East);
        assert_eq!(attack.apply(&mut state, &env, &mut log), Ok(ActionOutcome::Performed));

        assert_eq!(state.entities.npcs[0].health.current, 5);
        assert_eq!(log[0].text, "Player attacks orc for 5 hit points.");
        assert_eq!(log[0].style, MessageStyle::PlayerAttack);
    }

    #[test]
    fn equipment_bonuses_apply() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let armored = orc(1, Position::new(2, 1))
            .with_equipment(Equipment::builder().armor(MAIL).build());
        let mut state = state_with(vec![armored]);
        state.entities.player.equipment = Equipment::builder().weapon(SWORD).build();

        let attack = MeleeAction::new(EntityId::PLAYER, Direction::East);
        attack.apply(&mut state, &env, &mut Vec::<Message>::new()).unwrap();

        // (5 + 4) - (0 + 3)
        assert_eq!(state.entities.npcs[0].health.current, 4);
    }

    #[test]
    fn zero_damage_is_no_effect() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(vec![orc(1, Position::new(2, 1)).with_combat(1, 0)]);
        let mut log: Vec<Message> = Vec::new();

        let attack = MeleeAction::new(EntityId(1), Direction::West);
        assert_eq!(attack.apply(&mut state, &env, &mut log), Ok(ActionOutcome::NoEffect));
        assert_eq!(log[0].text, "Orc attacks Player but does no damage.");
        assert_eq!(state.entities.player.health.current, 30);
    }

    #[test]
    fn lethal_hit_kills_and_renames() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(vec![orc(1, Position::new(2, 1))]);
        state.entities.player.power = 50;
        let mut log: Vec<Message> = Vec::new();

        MeleeAction::new(EntityId::PLAYER, Direction::East)
            .apply(&mut state, &env, &mut log)
            .unwrap();

        let corpse = &state.entities.npcs[0];
        assert!(!corpse.is_alive());
        assert_eq!(corpse.name, "remains of orc");
        assert_eq!(log[1], Message::new("Orc is dead!", MessageStyle::EnemyDeath));
        assert!(state.entities.living_actor_at(0, Position::new(2, 1)).is_none());
    }

    #[test]
    fn player_death_message() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(vec![orc(1, Position::new(2, 1)).with_combat(99, 0)]);
        let mut log: Vec<Message> = Vec::new();

        MeleeAction::new(EntityId(1), Direction::West)
            .apply(&mut state, &env, &mut log)
            .unwrap();

        assert!(!state.entities.player.is_alive());
        assert_eq!(log.last(), Some(&Message::new("You died!", MessageStyle::PlayerDeath)));
    }

    #[test]
    fn melee_needs_a_living_target() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let state = state_with(Vec::new());

        let attack = MeleeAction::new(EntityId::PLAYER, Direction::East);
        assert_eq!(
            attack.validate(&state, &env),
            Err(ActionError::NothingToAttack { destination: Position::new(2, 1) })
        );
    }

    #[test]
    fn bump_resolves_against_the_world_at_execution_time() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(vec![orc(1, Position::new(4, 3))]);
        let bump = Action::from(BumpAction::new(EntityId::PLAYER, Direction::East));

        // Empty when the intent is created.
        assert!(matches!(
            BumpAction::new(EntityId::PLAYER, Direction::East).resolve(&state),
            Ok(BumpResolution::Move(_))
        ));

        // The orc steps in before the intent becomes due.
        state.entities.npcs[0].position = Position::new(2, 1);
        let mut log: Vec<Message> = Vec::new();
        bump.execute(&mut state, &env, &mut log).unwrap();

        assert_eq!(state.entities.player.position, Position::new(1, 1));
        assert_eq!(state.entities.npcs[0].health.current, 5);
        assert_eq!(log[0].style, MessageStyle::PlayerAttack);
    }

    #[test]
    fn bump_into_empty_tile_moves() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());

        Action::from(BumpAction::new(EntityId::PLAYER, Direction::SouthEast))
            .execute(&mut state, &env, &mut Vec::<Message>::new())
            .unwrap();

        assert_eq!(state.entities.player.position, Position::new(2, 2));
    }
}
