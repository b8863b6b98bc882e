//! Item-related state types.
//!
//! - ItemHandle: Reference to item definitions
//! - ItemState: Items that lie on the ground (not inside inventories)

use super::{EntityId, Position};

/// Reference to an item definition stored outside the core (lookup via Env).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Items that exist on the ground.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub floor: u32,
    pub position: Position,
    pub handle: ItemHandle,
}

impl ItemState {
    pub fn new(id: EntityId, floor: u32, position: Position, handle: ItemHandle) -> Self {
        Self {
            id,
            floor,
            position,
            handle,
        }
    }
}
