//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities and the
//! player's view of the world. Runtime layers clone or query this state but
//! mutate it exclusively through actions.
pub mod types;

pub use types::{
    ActorState, AiMode, Direction, EntitiesState, EntityId, Equipment, EquipmentBuilder,
    EquipmentSlot, InventorySlot, InventoryState, ItemHandle, ItemState, Position, ResourceMeter,
    Speed, Tick, WorldState,
};

use crate::env::MapOracle;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    pub game_seed: u64,

    /// Count of successfully executed intents. Mixed into every RNG seed.
    pub nonce: u64,

    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,

    pub entities: EntitiesState,
    pub world: WorldState,
}

impl GameState {
    pub fn new(game_seed: u64, entities: EntitiesState, world: WorldState) -> Self {
        let next_entity_id = entities
            .all_actors()
            .map(|actor| actor.id.0)
            .chain(entities.items.iter().map(|item| item.id.0))
            .max()
            .unwrap_or(EntityId::PLAYER.0)
            .saturating_add(1);
        Self {
            game_seed,
            nonce: 0,
            next_entity_id,
            entities,
            world,
        }
    }

    /// Allocates a new unique EntityId. Saturates instead of wrapping onto the player ID.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id.max(1));
        self.next_entity_id = id.0.saturating_add(1);
        id
    }

    pub fn player(&self) -> &ActorState {
        &self.entities.player
    }

    /// Whether an actor could step onto `position` on `floor`: in bounds,
    /// walkable, and not occupied by a living actor.
    pub fn can_enter<M>(&self, map: &M, floor: u32, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        map.contains(floor, position)
            && map.is_walkable(floor, position)
            && self.entities.living_actor_at(floor, position).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_continues_after_existing_ids() {
        let player = ActorState::player("Player", Position::new(0, 0), 30);
        let orc = ActorState::new(EntityId(4), "Orc", Position::new(1, 0), 10);
        let items = vec![ItemState::new(EntityId(7), 0, Position::new(0, 0), ItemHandle(1))];
        let entities = EntitiesState::new(player, vec![orc], items);
        let mut state = GameState::new(1, entities, WorldState::new(0));

        assert_eq!(state.allocate_entity_id(), EntityId(8));
        assert_eq!(state.allocate_entity_id(), EntityId(9));
    }
}
