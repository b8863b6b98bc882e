//! Runtime implementations of the `game-core` oracle traits.
//!
//! The data is immutable at runtime and bundled into an [`OracleBundle`] so the
//! session can build [`game_core::GameEnv`] views on demand. Dynamic state
//! lives in [`game_core::GameState`].
pub mod demo;
mod items;
mod map;

use std::sync::Arc;

use game_core::{Env, GameEnv, PcgRng};

pub use items::ItemOracleImpl;
pub use map::MapOracleImpl;

/// Owns every oracle a session needs.
#[derive(Clone)]
pub struct OracleBundle {
    map: Arc<MapOracleImpl>,
    items: Arc<ItemOracleImpl>,
    rng: PcgRng,
}

impl OracleBundle {
    pub fn new(map: MapOracleImpl, items: ItemOracleImpl) -> Self {
        Self {
            map: Arc::new(map),
            items: Arc::new(items),
            rng: PcgRng, // stateless
        }
    }

    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(self.map.as_ref(), self.items.as_ref(), &self.rng).as_game_env()
    }

    pub fn map(&self) -> &MapOracleImpl {
        &self.map
    }

    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }
}
