//! Keyboard-to-command mapping.
//!
//! Keeps `crossterm` key codes out of the terminal loop so bindings can be
//! tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
use game_core::{
    Action, BumpAction, ChangeFloorAction, Direction, DropAction, EntityId, EquipAction,
    FloorDirection, GameEnv, GameState, ItemKind, PickupAction, Position, UseItemAction,
    WaitAction,
};
use runtime::PlayerCommand;

/// What the next letter key does with the inventory slot it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotVerb {
    Use,
    Drop,
}

/// Translates key events into player commands.
///
/// `i` and `d` open a slot selection: the following `a`-`z` names one of the
/// inventory slots, anything else cancels it.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyMap {
    pending: Option<SlotVerb>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot selection waiting for a letter, if any.
    pub fn pending(&self) -> Option<SlotVerb> {
        self.pending
    }

    /// Returns `None` for keys with no binding and for keys that only change
    /// the selection mode.
    pub fn command(
        &mut self,
        key: KeyEvent,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Option<PlayerCommand> {
        let player = EntityId::PLAYER;

        if let Some(verb) = self.pending.take() {
            let KeyCode::Char(letter @ 'a'..='z') = key.code else {
                return None;
            };
            let slot = (letter as usize) - ('a' as usize);
            return Some(act(slot_verb(verb, slot, state, env)));
        }

        if let Some(direction) = direction_for(key) {
            return Some(act(Action::Bump(BumpAction::new(player, direction))));
        }

        let command = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => PlayerCommand::Quit,
            KeyCode::Char('.') => act(Action::Wait(WaitAction::new(player))),
            KeyCode::Char('5') if key.state.contains(KeyEventState::KEYPAD) => {
                act(Action::Wait(WaitAction::new(player)))
            }
            KeyCode::Char('g') | KeyCode::Char(',') => {
                act(Action::Pickup(PickupAction::new(player)))
            }
            KeyCode::Char('>') => act(Action::ChangeFloor(ChangeFloorAction::new(
                player,
                FloorDirection::Down,
            ))),
            KeyCode::Char('<') => act(Action::ChangeFloor(ChangeFloorAction::new(
                player,
                FloorDirection::Up,
            ))),
            KeyCode::Char('i') => {
                self.pending = Some(SlotVerb::Use);
                return None;
            }
            KeyCode::Char('d') => {
                self.pending = Some(SlotVerb::Drop);
                return None;
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let slot = (digit as usize) - ('1' as usize);
                let verb = if key.modifiers.contains(KeyModifiers::ALT) {
                    SlotVerb::Drop
                } else {
                    SlotVerb::Use
                };
                act(slot_verb(verb, slot, state, env))
            }
            _ => return None,
        };
        Some(command)
    }
}

fn slot_verb(verb: SlotVerb, slot: usize, state: &GameState, env: &GameEnv<'_>) -> Action {
    match verb {
        SlotVerb::Use => slot_action(slot, state, env),
        SlotVerb::Drop => Action::Drop(DropAction::new(EntityId::PLAYER, slot)),
    }
}

fn act(action: Action) -> PlayerCommand {
    PlayerCommand::Act(action)
}

fn direction_for(key: KeyEvent) -> Option<Direction> {
    if key.state.contains(KeyEventState::KEYPAD) {
        let direction = match key.code {
            KeyCode::Char('8') => Direction::North,
            KeyCode::Char('2') => Direction::South,
            KeyCode::Char('6') => Direction::East,
            KeyCode::Char('4') => Direction::West,
            KeyCode::Char('9') => Direction::NorthEast,
            KeyCode::Char('7') => Direction::NorthWest,
            KeyCode::Char('3') => Direction::SouthEast,
            KeyCode::Char('1') => Direction::SouthWest,
            _ => return None,
        };
        return Some(direction);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Direction::North,
        KeyCode::Down | KeyCode::Char('j') => Direction::South,
        KeyCode::Right | KeyCode::Char('l') => Direction::East,
        KeyCode::Left | KeyCode::Char('h') => Direction::West,
        KeyCode::PageUp | KeyCode::Char('u') => Direction::NorthEast,
        KeyCode::Home | KeyCode::Char('y') => Direction::NorthWest,
        KeyCode::PageDown | KeyCode::Char('n') => Direction::SouthEast,
        KeyCode::End | KeyCode::Char('b') => Direction::SouthWest,
        _ => return None,
    };
    Some(direction)
}

/// Equipment in the slot is equipped; anything else is used.
///
/// An empty or unknown slot still yields a use intent so the rejection is
/// narrated by the action itself.
fn slot_action(slot: usize, state: &GameState, env: &GameEnv<'_>) -> Action {
    let player = EntityId::PLAYER;
    let definition = state
        .player()
        .inventory
        .slot(slot)
        .and_then(|entry| env.item(entry.handle).ok());

    match definition.map(|definition| definition.kind) {
        Some(ItemKind::Weapon { .. }) | Some(ItemKind::Armor { .. }) => {
            Action::Equip(EquipAction::new(player, slot))
        }
        Some(ItemKind::Consumable(effect)) if effect.needs_target() => {
            Action::UseItem(UseItemAction::new(player, slot, nearest_visible_enemy(state)))
        }
        _ => Action::UseItem(UseItemAction::new(player, slot, None)),
    }
}

/// Closest visible living NPC on the player's floor.
fn nearest_visible_enemy(state: &GameState) -> Option<Position> {
    let player = state.player();
    state
        .entities
        .living_npcs_on(player.floor)
        .filter(|npc| state.world.is_visible(npc.position))
        .min_by_key(|npc| player.position.chebyshev(npc.position))
        .map(|npc| npc.position)
}
