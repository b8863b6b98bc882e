use crate::state::Position;

/// Static multi-floor map exposing immutable layout information.
///
/// Floors are indexed from 0 (the surface). Going "down" increases the index.
pub trait MapOracle: Send + Sync {
    fn floor_count(&self) -> u32;
    fn dimensions(&self, floor: u32) -> Option<MapDimensions>;
    fn tile(&self, floor: u32, position: Position) -> Option<StaticTile>;

    /// Tile an actor lands on after arriving on `floor` while travelling in `direction`.
    ///
    /// The default places descending actors on the up stairs and ascending actors on
    /// the down stairs, mirroring how staircases connect.
    fn arrival(&self, floor: u32, direction: FloorDirection) -> Option<Position> {
        let wanted = match direction {
            FloorDirection::Down => TerrainKind::StairsUp,
            FloorDirection::Up => TerrainKind::StairsDown,
        };
        self.find_terrain(floor, wanted)
    }

    fn contains(&self, floor: u32, position: Position) -> bool {
        self.dimensions(floor)
            .map(|dims| dims.contains(position))
            .unwrap_or(false)
    }

    fn is_walkable(&self, floor: u32, position: Position) -> bool {
        self.tile(floor, position)
            .map(StaticTile::is_passable)
            .unwrap_or(false)
    }

    /// First tile of the given terrain in row-major order.
    fn find_terrain(&self, floor: u32, terrain: TerrainKind) -> Option<Position> {
        let dims = self.dimensions(floor)?;
        (0..dims.height as i32)
            .flat_map(|y| (0..dims.width as i32).map(move |x| Position::new(x, y)))
            .find(|&pos| self.tile(floor, pos).map(StaticTile::terrain) == Some(terrain))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    StairsDown,
    StairsUp,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Wall)
    }

    /// Stairs matching a travel direction.
    pub fn stairs(direction: FloorDirection) -> Self {
        match direction {
            FloorDirection::Down => TerrainKind::StairsDown,
            FloorDirection::Up => TerrainKind::StairsUp,
        }
    }
}

/// Which way a staircase leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum FloorDirection {
    Up,
    Down,
}

impl FloorDirection {
    /// Floor index reached from `floor`, or `None` when it would leave the dungeon.
    pub fn target(self, floor: u32, floor_count: u32) -> Option<u32> {
        let target = match self {
            FloorDirection::Down => floor.checked_add(1)?,
            FloorDirection::Up => floor.checked_sub(1)?,
        };
        (target < floor_count).then_some(target)
    }
}
