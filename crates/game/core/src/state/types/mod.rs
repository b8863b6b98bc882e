pub mod actor;
pub mod common;
pub mod entities;
pub mod item;
pub mod world;

pub use actor::{
    ActorState, AiMode, Equipment, EquipmentBuilder, EquipmentSlot, InventorySlot, InventoryState,
};
pub use common::{Direction, EntityId, Position, ResourceMeter, Speed, Tick};
pub use entities::EntitiesState;
pub use item::{ItemHandle, ItemState};
pub use world::WorldState;
