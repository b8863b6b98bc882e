use crate::action::{ActionError, ActionOutcome, ActionTransition, actor_mut, living_actor};
use crate::env::{GameEnv, MapOracle};
use crate::narration::MessageSink;
use crate::state::{Direction, EntityId, GameState, Position};

/// Step one tile in a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    /// Checks that `destination` is in bounds, walkable and unoccupied.
    pub(crate) fn check_destination(
        state: &GameState,
        map: &dyn MapOracle,
        floor: u32,
        destination: Position,
    ) -> Result<(), ActionError> {
        if !map.contains(floor, destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if !map.is_walkable(floor, destination) {
            return Err(ActionError::Blocked { destination });
        }
        if state.entities.living_actor_at(floor, destination).is_some() {
            return Err(ActionError::Occupied { destination });
        }
        Ok(())
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let map = env.map()?;
        let destination = actor.position.offset(self.direction);
        Self::check_destination(state, map, actor.floor, destination)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = actor_mut(state, self.actor)?;
        actor.position = actor.position.offset(self.direction);
        Ok(ActionOutcome::Performed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::*;
    use crate::env::{Env, ItemOracle, PcgRng, RngOracle};
    use crate::narration::Message;

    #[test]
    fn rejects_walls_bounds_and_living_actors() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let state = state_with(vec![orc(1, Position::new(2, 2))]);

        let wall = MoveAction::new(EntityId::PLAYER, Direction::West);
        assert_eq!(
            wall.validate(&state, &env),
            Err(ActionError::Blocked { destination: Position::new(0, 1) })
        );

        let occupied = MoveAction::new(EntityId::PLAYER, Direction::SouthEast);
        assert_eq!(
            occupied.validate(&state, &env),
            Err(ActionError::Occupied { destination: Position::new(2, 2) })
        );

        let mut corner = state.clone();
        corner.entities.player.position = Position::new(0, 0);
        let off_map = MoveAction::new(EntityId::PLAYER, Direction::NorthWest);
        assert!(matches!(
            off_map.validate(&corner, &env),
            Err(ActionError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn corpses_do_not_block() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut corpse = orc(1, Position::new(2, 1));
        corpse.health.current = 0;
        let mut state = state_with(vec![corpse]);
        let step = MoveAction::new(EntityId::PLAYER, Direction::East);

        assert!(step.validate(&state, &env).is_ok());
        step.apply(&mut state, &env, &mut Vec::<Message>::new()).unwrap();
        assert_eq!(state.entities.player.position, Position::new(2, 1));
    }

    #[test]
    fn missing_map_is_fatal() {
        let items = Items;
        let env: GameEnv<'_> = Env::new(
            None,
            Some(&items as &dyn ItemOracle),
            Some(&PcgRng as &dyn RngOracle),
        );
        let state = state_with(Vec::new());
        let step = MoveAction::new(EntityId::PLAYER, Direction::East);

        let err = step.validate(&state, &env).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
