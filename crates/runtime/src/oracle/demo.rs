//! Hand-authored two-floor scenario used by the terminal client and tests.
//!
//! Map data lives in the oracles; this module only decides where entities start.

use game_core::{
    ActorState, EntitiesState, EntityId, GameState, ItemHandle, ItemState, Position, Speed,
    WorldState,
};

use super::{ItemOracleImpl, MapOracleImpl, OracleBundle};

pub const SURFACE: &[&str] = &[
    "########################",
    "#......#.......#.......#",
    "#......#.......#.......#",
    "#..............#.......#",
    "#......#...............#",
    "#......#.......#.......#",
    "####.#####.#########.###",
    "#......................#",
    "#.....................>#",
    "########################",
];

pub const CELLAR: &[&str] = &[
    "########################",
    "#<.....................#",
    "#......................#",
    "#.........#####........#",
    "#.........#...#........#",
    "#.........#...#........#",
    "#......................#",
    "########################",
];

pub const PLAYER_START: Position = Position::new(2, 2);

/// Kind of entity placed by the scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Goblin,
    Orc,
    Item(ItemHandle),
}

/// (floor, position, what)
pub const PLACEMENTS: &[(u32, Position, Placement)] = &[
    (0, Position::new(10, 2), Placement::Goblin),
    (0, Position::new(18, 4), Placement::Goblin),
    (0, Position::new(4, 4), Placement::Item(ItemOracleImpl::HEALTH_POTION)),
    (0, Position::new(12, 7), Placement::Item(ItemOracleImpl::LIGHTNING_SCROLL)),
    (0, Position::new(5, 7), Placement::Item(ItemOracleImpl::DAGGER)),
    (0, Position::new(9, 8), Placement::Item(ItemOracleImpl::LEATHER_ARMOR)),
    (1, Position::new(16, 2), Placement::Orc),
    (1, Position::new(20, 5), Placement::Goblin),
    (1, Position::new(3, 5), Placement::Item(ItemOracleImpl::CONFUSION_SCROLL)),
    (1, Position::new(5, 6), Placement::Item(ItemOracleImpl::FIREBALL_SCROLL)),
    (1, Position::new(12, 4), Placement::Item(ItemOracleImpl::SWORD)),
    (1, Position::new(21, 6), Placement::Item(ItemOracleImpl::CHAIN_MAIL)),
];

pub fn oracles() -> OracleBundle {
    OracleBundle::new(
        MapOracleImpl::from_ascii(&[SURFACE, CELLAR]),
        ItemOracleImpl::standard(),
    )
}

/// Initial state with entity ids assigned in placement order after the player.
pub fn initial_state(game_seed: u64) -> GameState {
    let player = ActorState::player("Player", PLAYER_START, 30).with_combat(5, 1);
    let mut npcs = Vec::new();
    let mut items = Vec::new();

    for (index, &(floor, position, placement)) in PLACEMENTS.iter().enumerate() {
        let id = EntityId(index as u32 + 1);
        match placement {
            Placement::Goblin => npcs.push(goblin(id, floor, position)),
            Placement::Orc => npcs.push(orc(id, floor, position)),
            Placement::Item(handle) => items.push(ItemState::new(id, floor, position, handle)),
        }
    }

    GameState::new(
        game_seed,
        EntitiesState::new(player, npcs, items),
        WorldState::new(0),
    )
}

fn goblin(id: EntityId, floor: u32, position: Position) -> ActorState {
    ActorState::new(id, "goblin", position, 8)
        .with_floor(floor)
        .with_combat(3, 0)
        .with_speed(Speed::new(12).unwrap_or(Speed::MIN))
}

fn orc(id: EntityId, floor: u32, position: Position) -> ActorState {
    ActorState::new(id, "orc", position, 16)
        .with_floor(floor)
        .with_combat(4, 1)
        .with_speed(Speed::new(8).unwrap_or(Speed::MIN))
}
