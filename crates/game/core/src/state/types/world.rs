use std::collections::BTreeSet;

use crate::env::{MapOracle, StaticTile};

use super::Position;

/// World-level state layered on top of the static map oracle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Floor the player is currently on.
    pub depth: u32,
    /// Tiles the player can currently see.
    pub visible: BTreeSet<Position>,
    /// Tiles the player has seen at some point on this floor.
    pub explored: BTreeSet<Position>,
}

impl WorldState {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    /// Replaces the visible set and folds it into the explored set.
    pub fn update_visibility(&mut self, visible: BTreeSet<Position>) {
        self.explored.extend(visible.iter().copied());
        self.visible = visible;
    }

    /// Forgets everything seen; used when the player changes floor.
    pub fn reset_visibility(&mut self) {
        self.visible.clear();
        self.explored.clear();
    }

    /// Looks up the static tile at `position` on `floor`.
    pub fn tile<M>(&self, map: &M, floor: u32, position: Position) -> Option<StaticTile>
    where
        M: MapOracle + ?Sized,
    {
        map.tile(floor, position)
    }
}
