use super::{ActorState, EntityId, ItemState, Position};

/// Aggregate state for every entity in the dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: ActorState,
    pub npcs: Vec<ActorState>,
    pub items: Vec<ItemState>,
}

impl EntitiesState {
    pub fn new(player: ActorState, npcs: Vec<ActorState>, items: Vec<ItemState>) -> Self {
        Self {
            player,
            npcs,
            items,
        }
    }

    /// Returns a reference to an actor by ID (player or NPC).
    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.npcs.iter().find(|actor| actor.id == id)
    }

    /// Returns a mutable reference to an actor by ID (player or NPC).
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.npcs.iter_mut().find(|actor| actor.id == id)
    }

    /// Returns an iterator over all actors (player + NPCs).
    pub fn all_actors(&self) -> impl Iterator<Item = &ActorState> {
        std::iter::once(&self.player).chain(self.npcs.iter())
    }

    /// Living NPCs standing on `floor`, in insertion order.
    pub fn living_npcs_on(&self, floor: u32) -> impl Iterator<Item = &ActorState> {
        self.npcs
            .iter()
            .filter(move |actor| actor.floor == floor && actor.is_alive())
    }

    /// The living actor occupying a tile, if any. Corpses never block.
    pub fn living_actor_at(&self, floor: u32, position: Position) -> Option<&ActorState> {
        self.all_actors()
            .find(|actor| actor.floor == floor && actor.position == position && actor.is_alive())
    }

    /// Items lying on a tile, in the order they were dropped.
    pub fn items_at(&self, floor: u32, position: Position) -> impl Iterator<Item = &ItemState> {
        self.items
            .iter()
            .filter(move |item| item.floor == floor && item.position == position)
    }

    /// Removes a ground item by entity ID.
    pub fn remove_item(&mut self, id: EntityId) -> Option<ItemState> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
