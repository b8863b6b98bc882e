//! Deterministic turn-ordering and action-resolution rules.
//!
//! `game-core` defines the canonical state, the closed set of intents, and the
//! time-ordered schedule that decides who acts next. It performs no I/O; the
//! runtime drives it and supplies the oracles through [`env::GameEnv`].
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod narration;
pub mod schedule;
pub mod state;

pub use action::{
    Action, ActionError, ActionOutcome, ActionTransition, BumpAction, BumpResolution,
    ChangeFloorAction, DropAction, EquipAction, MeleeAction, MoveAction, PickupAction,
    UseItemAction, WaitAction,
};
pub use config::GameConfig;
pub use env::{
    ConsumableEffect, Env, FloorDirection, GameEnv, ItemDefinition, ItemKind, ItemOracle,
    MapDimensions, MapOracle, OracleError, PcgRng, RngOracle, StaticTile, TerrainKind,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use narration::{Message, MessageSink, MessageStyle};
pub use schedule::{
    EntryId, EventQueue, IntentHandle, QueueEntry, QueueError, ScheduledAction, TurnSchedule,
};
pub use state::{
    ActorState, AiMode, Direction, EntitiesState, EntityId, Equipment, EquipmentSlot, GameState,
    InventorySlot, InventoryState, ItemHandle, ItemState, Position, ResourceMeter, Speed, Tick,
    WorldState,
};
