//! [`game_core::MapOracle`] backed by ASCII floor plans.
use game_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind};

#[derive(Clone, Debug, PartialEq, Eq)]
struct FloorLayout {
    dimensions: MapDimensions,
    /// Row-major terrain.
    tiles: Vec<TerrainKind>,
}

impl FloorLayout {
    fn parse(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut tiles = vec![TerrainKind::Wall; width * height];

        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                tiles[y * width + x] = match glyph {
                    '.' => TerrainKind::Floor,
                    '>' => TerrainKind::StairsDown,
                    '<' => TerrainKind::StairsUp,
                    _ => TerrainKind::Wall,
                };
            }
        }

        Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles,
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

/// Static multi-floor map. `#` wall, `.` floor, `>` stairs down, `<` stairs up.
///
/// Unknown glyphs and short rows are filled with walls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapOracleImpl {
    floors: Vec<FloorLayout>,
}

impl MapOracleImpl {
    /// Floor 0 is the first slice, deeper floors follow.
    pub fn from_ascii(floors: &[&[&str]]) -> Self {
        Self {
            floors: floors.iter().map(|rows| FloorLayout::parse(rows)).collect(),
        }
    }
}

impl MapOracle for MapOracleImpl {
    fn floor_count(&self) -> u32 {
        self.floors.len() as u32
    }

    fn dimensions(&self, floor: u32) -> Option<MapDimensions> {
        self.floors.get(floor as usize).map(|layout| layout.dimensions)
    }

    fn tile(&self, floor: u32, position: Position) -> Option<StaticTile> {
        let layout = self.floors.get(floor as usize)?;
        let index = layout.index(position)?;
        layout.tiles.get(index).copied().map(StaticTile::new)
    }
}
