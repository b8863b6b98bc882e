//! Line-oriented terminal front end.
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use game_core::{EntityId, GameState, ItemOracle, MapOracle, Position, TerrainKind};
use runtime::{
    InputSource, MessageLog, OracleBundle, PlayerCommand, RuntimeError, SessionEnd,
};
use tracing::debug;

use crate::input::{KeyMap, SlotVerb};

/// Keeps the terminal in raw mode for its lifetime.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads player commands from the keyboard and prints the game between turns.
pub struct TerminalInput {
    keys: KeyMap,
    oracles: OracleBundle,
    seen_revision: u64,
}

impl TerminalInput {
    pub fn new(oracles: OracleBundle) -> Self {
        Self {
            keys: KeyMap::new(),
            oracles,
            seen_revision: 0,
        }
    }

    fn draw(&mut self, state: &GameState, messages: &MessageLog) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for entry in messages.since(self.seen_revision) {
            write!(out, "{entry}\r\n")?;
        }
        self.seen_revision = messages.revision();

        for row in render_map(state, &self.oracles) {
            write!(out, "{row}\r\n")?;
        }
        write!(out, "{}\r\n", status_line(state, &self.oracles))?;
        out.flush()
    }
}

impl InputSource for TerminalInput {
    fn next_command(
        &mut self,
        state: &GameState,
        messages: &MessageLog,
    ) -> runtime::Result<PlayerCommand> {
        self.draw(state, messages).map_err(RuntimeError::Input)?;

        loop {
            let Event::Key(key) = event::read().map_err(RuntimeError::Input)? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let env = self.oracles.as_game_env();
            match self.keys.command(key, state, &env) {
                Some(command) => return Ok(command),
                None => match self.keys.pending() {
                    Some(verb) => prompt_for_slot(verb).map_err(RuntimeError::Input)?,
                    None => debug!(target: "cli::input", code = ?key.code, "unbound key"),
                },
            }
        }
    }

    fn session_ended(&mut self, end: SessionEnd, _state: &GameState, messages: &MessageLog) {
        let mut out = io::stdout().lock();
        for entry in messages.since(self.seen_revision) {
            let _ = write!(out, "{entry}\r\n");
        }
        self.seen_revision = messages.revision();

        let farewell = match end {
            SessionEnd::Quit => "Farewell.",
            SessionEnd::PlayerDied => "Your adventure ends here.",
        };
        let _ = write!(out, "{farewell}\r\n");
        let _ = out.flush();
    }
}

fn prompt_for_slot(verb: SlotVerb) -> io::Result<()> {
    let verb = match verb {
        SlotVerb::Use => "use",
        SlotVerb::Drop => "drop",
    };
    let mut out = io::stdout().lock();
    write!(out, "Select an item to {verb} (a-z), any other key to cancel.\r\n")?;
    out.flush()
}

/// Explored tiles of the player's floor; actors and items only where visible.
pub fn render_map(state: &GameState, oracles: &OracleBundle) -> Vec<String> {
    let map = oracles.map();
    let floor = state.player().floor;
    let Some(dims) = map.dimensions(floor) else {
        return Vec::new();
    };

    (0..dims.height as i32)
        .map(|y| {
            (0..dims.width as i32)
                .map(|x| glyph(state, map, floor, Position::new(x, y)))
                .collect()
        })
        .collect()
}

fn glyph(state: &GameState, map: &dyn MapOracle, floor: u32, position: Position) -> char {
    if state.world.is_visible(position) {
        if let Some(actor) = state.entities.living_actor_at(floor, position) {
            return if actor.id == EntityId::PLAYER {
                '@'
            } else {
                actor.name.chars().next().unwrap_or('?')
            };
        }
        if state.entities.items_at(floor, position).next().is_some() {
            return '!';
        }
    } else if !state.world.explored.contains(&position) {
        return ' ';
    }

    match map.tile(floor, position).map(|tile| tile.terrain()) {
        Some(TerrainKind::Floor) => '.',
        Some(TerrainKind::StairsDown) => '>',
        Some(TerrainKind::StairsUp) => '<',
        Some(TerrainKind::Wall) | None => '#',
    }
}

pub fn status_line(state: &GameState, oracles: &OracleBundle) -> String {
    let player = state.player();
    let inventory: Vec<String> = player
        .inventory
        .items
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let name = oracles
                .items()
                .definition(slot.handle)
                .map(|definition| definition.name)
                .unwrap_or_else(|| "?".to_string());
            let label = char::from(b'a' + index as u8);
            if slot.quantity > 1 {
                format!("{label}:{name} x{}", slot.quantity)
            } else {
                format!("{label}:{name}")
            }
        })
        .collect();

    format!(
        "HP {}/{}  Depth {}  [{}]",
        player.health.current,
        player.health.maximum,
        state.world.depth,
        inventory.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::ItemOracleImpl;
    use runtime::oracle::demo;

    #[test]
    fn unexplored_tiles_are_blank() {
        let oracles = demo::oracles();
        let state = demo::initial_state(3);

        let rows = render_map(&state, &oracles);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn visible_player_is_drawn() {
        let oracles = demo::oracles();
        let mut state = demo::initial_state(3);
        let start = state.player().position;
        state.world.update_visibility([start].into_iter().collect());

        let rows = render_map(&state, &oracles);
        let row = &rows[start.y as usize];
        assert_eq!(row.chars().nth(start.x as usize), Some('@'));
    }

    #[test]
    fn status_lists_inventory() {
        let oracles = demo::oracles();
        let mut state = demo::initial_state(3);
        state
            .entities
            .player
            .inventory
            .add(ItemOracleImpl::HEALTH_POTION, 5);
        state
            .entities
            .player
            .inventory
            .add(ItemOracleImpl::HEALTH_POTION, 5);

        let line = status_line(&state, &oracles);
        assert!(line.starts_with("HP 30/30  Depth 0"));
        assert!(line.contains("a:Health Potion x2"));
        assert!(line.contains("x2"));
    }
}
