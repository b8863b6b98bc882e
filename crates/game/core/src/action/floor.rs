use crate::action::{ActionError, ActionOutcome, ActionTransition, actor_mut, living_actor};
use crate::env::{FloorDirection, GameEnv, StaticTile, TerrainKind};
use crate::narration::{MessageSink, MessageStyle};
use crate::state::{EntityId, GameState, Position};

/// Take the staircase under the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeFloorAction {
    pub actor: EntityId,
    pub direction: FloorDirection,
}

impl ChangeFloorAction {
    pub fn new(actor: EntityId, direction: FloorDirection) -> Self {
        Self { actor, direction }
    }

    /// Target floor and arrival tile.
    fn destination(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Result<(u32, Position), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let map = env.map()?;

        let terrain = map
            .tile(actor.floor, actor.position)
            .map(StaticTile::terrain);
        if terrain != Some(TerrainKind::stairs(self.direction)) {
            return Err(ActionError::NoStairs);
        }

        let unreachable = ActionError::NoSuchFloor {
            floor: match self.direction {
                FloorDirection::Down => actor.floor.saturating_add(1),
                FloorDirection::Up => actor.floor.saturating_sub(1),
            },
        };
        let floor = self
            .direction
            .target(actor.floor, map.floor_count())
            .ok_or_else(|| unreachable.clone())?;
        let arrival = map.arrival(floor, self.direction).ok_or(unreachable)?;
        Ok((floor, arrival))
    }
}

impl ActionTransition for ChangeFloorAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        self.destination(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let (floor, arrival) = self.destination(state, env)?;

        let actor = actor_mut(state, self.actor)?;
        actor.floor = floor;
        actor.position = arrival;

        if self.actor.is_player() {
            state.world.depth = floor;
            state.world.reset_visibility();
            let verb = match self.direction {
                FloorDirection::Down => "descend",
                FloorDirection::Up => "ascend",
            };
            sink.add_message(format!("You {verb} the staircase."), MessageStyle::Descend);
        }
        Ok(ActionOutcome::FloorChanged { depth: floor })
    }
}
