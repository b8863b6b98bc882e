use crate::state::Tick;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Radius of the player's field of view, in tiles.
    pub fov_radius: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Distinct inventory slots per actor (one per letter a-z).
    pub const MAX_INVENTORY_SLOTS: usize = 26;

    // ===== time costs =====
    /// Base cost of a standard action: one time unit.
    pub const BASE_ACTION_COST: Tick = Tick(100);
    /// Picking something up is half as expensive as a standard action.
    pub const PICKUP_ACTION_COST: Tick = Tick(50);
    /// Speed of an unremarkable actor; a standard action then costs 10 ticks.
    pub const NORMAL_SPEED: u32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FOV_RADIUS: u32 = 8;

    pub fn new() -> Self {
        Self {
            fov_radius: Self::DEFAULT_FOV_RADIUS,
        }
    }

    pub fn with_fov_radius(fov_radius: u32) -> Self {
        Self { fov_radius }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
