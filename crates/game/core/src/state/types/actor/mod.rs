//! Actor-related state types.
//!
//! - ActorState: identity, placement, combat numbers, speed
//! - Equipment: weapon and armor slots
//! - Inventory: item storage

pub mod equipment;
pub mod inventory;

pub use equipment::{Equipment, EquipmentBuilder, EquipmentSlot};
pub use inventory::{InventorySlot, InventoryState};

use super::{EntityId, Position, ResourceMeter, Speed};
use crate::config::GameConfig;

/// Which decision policy drives an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiMode {
    /// Driven by external input.
    Player,
    /// Chases and attacks the player.
    #[default]
    Hostile,
    /// Stumbles in random directions, then reverts to `Hostile`.
    Confused { turns_remaining: u32 },
}

/// Complete actor state.
///
/// # Invariants
///
/// - `speed` is strictly positive (enforced by [`Speed`])
/// - an actor with `health.current == 0` is dead and never blocks movement
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    /// Floor index the actor currently stands on.
    pub floor: u32,
    pub position: Position,
    pub speed: Speed,
    /// Remainder of the last delay division, in `1 / speed` ticks.
    pub delay_carry: u32,
    pub health: ResourceMeter,
    /// Unarmed attack strength.
    pub power: u32,
    /// Unarmoured damage reduction.
    pub defense: u32,
    pub ai: AiMode,
    pub inventory: InventoryState,
    pub equipment: Equipment,
}

impl ActorState {
    /// Creates a hostile actor with normal speed and an empty inventory.
    pub fn new(id: EntityId, name: impl Into<String>, position: Position, max_hp: u32) -> Self {
        let speed = Speed::new(GameConfig::NORMAL_SPEED).unwrap_or(Speed::MIN);
        Self {
            id,
            name: name.into(),
            floor: 0,
            position,
            speed,
            delay_carry: 0,
            health: ResourceMeter::full(max_hp),
            power: 0,
            defense: 0,
            ai: AiMode::Hostile,
            inventory: InventoryState::empty(),
            equipment: Equipment::empty(),
        }
    }

    /// Creates the player-controlled actor.
    pub fn player(name: impl Into<String>, position: Position, max_hp: u32) -> Self {
        Self::new(EntityId::PLAYER, name, position, max_hp).with_ai(AiMode::Player)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_combat(mut self, power: u32, defense: u32) -> Self {
        self.power = power;
        self.defense = defense;
        self
    }

    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_ai(mut self, ai: AiMode) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_inventory(mut self, inventory: InventoryState) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }
}
