//! Traits describing read-only world data.
//!
//! Oracles expose static map geometry, item definitions and deterministic
//! randomness. The [`Env`] aggregate bundles them so actions can reach
//! everything they need without coupling to concrete implementations.
mod error;
mod items;
mod map;
mod rng;

pub use error::OracleError;
pub use items::{ConsumableEffect, ItemDefinition, ItemKind, ItemOracle};
pub use map::{FloorDirection, MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::state::ItemHandle;

/// Aggregates read-only oracles required by the action contract.
pub struct Env<'a, M, I, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    items: Option<&'a I>,
    rng: Option<&'a R>,
}

impl<M, I, R> Clone for Env<'_, M, I, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

// Only references are stored, so copying never requires the oracles to be `Copy`.
impl<M, I, R> Copy for Env<'_, M, I, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn ItemOracle + 'a, dyn RngOracle + 'a>;

impl<'a, M, I, R> Env<'a, M, I, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, items: Option<&'a I>, rng: Option<&'a R>) -> Self {
        Self { map, items, rng }
    }

    pub fn with_all(map: &'a M, items: &'a I, rng: &'a R) -> Self {
        Self::new(Some(map), Some(items), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            items: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Looks up an item definition, treating an unknown handle as an error.
    pub fn item(&self, handle: ItemHandle) -> Result<ItemDefinition, OracleError> {
        self.items()?
            .definition(handle)
            .ok_or(OracleError::ItemNotFound(handle))
    }
}

impl<'a, M, I, R> Env<'a, M, I, R>
where
    M: MapOracle + 'a,
    I: ItemOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, items, rng)
    }
}
