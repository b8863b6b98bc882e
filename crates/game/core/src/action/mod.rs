//! Action contract.
//!
//! Every intent an actor can submit is one variant of the closed [`Action`]
//! enum. Each variant is its own struct implementing [`ActionTransition`]:
//!
//! - `validate` is a pure check against the current state; safe to call speculatively
//! - `apply` mutates state and narrates what happened through a [`MessageSink`]
//!
//! [`Action::execute`] always validates first, so an intent that validates
//! never fails with a recoverable error when applied immediately afterwards.

pub mod combat;
pub mod error;
pub mod floor;
pub mod inventory;
pub mod item;
pub mod movement;
pub mod wait;

pub use combat::{BumpAction, BumpResolution, MeleeAction};
pub use error::ActionError;
pub use floor::ChangeFloorAction;
pub use inventory::{DropAction, EquipAction, PickupAction};
pub use item::UseItemAction;
pub use movement::MoveAction;
pub use wait::WaitAction;

use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::narration::MessageSink;
use crate::state::{ActorState, EntityId, GameState, Tick};

/// What a successfully executed intent did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Performed,
    /// The intent ran but changed nothing, e.g. an attack that did no damage.
    NoEffect,
    FloorChanged { depth: u32 },
}

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Base time cost in ticks, before speed scaling.
    fn base_cost(&self) -> Tick {
        GameConfig::BASE_ACTION_COST
    }

    /// Checks preconditions against the state **before** mutation. Must not mutate.
    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError>;

    /// Applies the action. Callers validate first.
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Closed set of intents.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Wait(WaitAction),
    Move(MoveAction),
    Melee(MeleeAction),
    Bump(BumpAction),
    Pickup(PickupAction),
    Drop(DropAction),
    Equip(EquipAction),
    UseItem(UseItemAction),
    ChangeFloor(ChangeFloorAction),
}

impl Action {
    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::Wait(action) => action,
            Action::Move(action) => action,
            Action::Melee(action) => action,
            Action::Bump(action) => action,
            Action::Pickup(action) => action,
            Action::Drop(action) => action,
            Action::Equip(action) => action,
            Action::UseItem(action) => action,
            Action::ChangeFloor(action) => action,
        }
    }

    pub fn actor(&self) -> EntityId {
        self.transition().actor()
    }

    pub fn base_cost(&self) -> Tick {
        self.transition().base_cost()
    }

    /// Short snake_case name for logs.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Ticks the actor waits after this intent; `None` if the actor is gone.
    ///
    /// Read-only preview. Scheduling goes through [`Action::take_delay`].
    pub fn delay(&self, state: &GameState) -> Option<Tick> {
        state
            .entities
            .actor(self.actor())
            .map(|actor| actor.speed.delay(self.base_cost(), actor.delay_carry).0)
    }

    /// Same as [`Action::delay`], and stores the division remainder on the
    /// actor so its next delay makes up for it.
    pub fn take_delay(&self, state: &mut GameState) -> Option<Tick> {
        let base_cost = self.base_cost();
        let actor = state.entities.actor_mut(self.actor())?;
        let (delay, carry) = actor.speed.delay(base_cost, actor.delay_carry);
        actor.delay_carry = carry;
        Some(delay)
    }

    pub fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        self.transition().validate(state, env)
    }

    pub fn is_valid(&self, state: &GameState, env: &GameEnv<'_>) -> bool {
        self.validate(state, env).is_ok()
    }

    /// Validates, then applies. Advances `state.nonce` only on success.
    pub fn execute(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let transition = self.transition();
        transition.validate(state, env)?;
        let outcome = transition.apply(state, env, sink)?;
        state.nonce += 1;
        Ok(outcome)
    }
}

macro_rules! impl_from_action {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action!(
    Wait(WaitAction),
    Move(MoveAction),
    Melee(MeleeAction),
    Bump(BumpAction),
    Pickup(PickupAction),
    Drop(DropAction),
    Equip(EquipAction),
    UseItem(UseItemAction),
    ChangeFloor(ChangeFloorAction),
);

/// Looks up an actor that is allowed to act.
pub(crate) fn living_actor(state: &GameState, id: EntityId) -> Result<&ActorState, ActionError> {
    let actor = state
        .entities
        .actor(id)
        .ok_or(ActionError::ActorNotFound(id))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDead(id));
    }
    Ok(actor)
}

pub(crate) fn actor_mut(
    state: &mut GameState,
    id: EntityId,
) -> Result<&mut ActorState, ActionError> {
    state
        .entities
        .actor_mut(id)
        .ok_or(ActionError::ActorNotFound(id))
}

/// Uppercases the first character of a name for sentence starts.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small fixtures shared by the action tests.

    use std::collections::BTreeSet;

    use crate::env::{
        ConsumableEffect, ItemDefinition, ItemKind, ItemOracle, MapDimensions,
        MapOracle, PcgRng, StaticTile, TerrainKind,
    };
    use crate::state::{
        ActorState, EntitiesState, EntityId, GameState, ItemHandle, Position, WorldState,
    };

    /// Floors parsed from ASCII rows: `#` wall, `>` down, `<` up, anything else floor.
    pub struct AsciiMap {
        floors: Vec<Vec<Vec<TerrainKind>>>,
    }

    impl AsciiMap {
        pub fn new(floors: &[&[&str]]) -> Self {
            let floors = floors
                .iter()
                .map(|rows| {
                    rows.iter()
                        .map(|row| {
                            row.chars()
                                .map(|ch| match ch {
                                    '#' => TerrainKind::Wall,
                                    '>' => TerrainKind::StairsDown,
                                    '<' => TerrainKind::StairsUp,
                                    _ => TerrainKind::Floor,
                                })
                                .collect()
                        })
                        .collect()
                })
                .collect();
            Self { floors }
        }
    }

    impl MapOracle for AsciiMap {
        fn floor_count(&self) -> u32 {
            self.floors.len() as u32
        }

        fn dimensions(&self, floor: u32) -> Option<MapDimensions> {
            let rows = self.floors.get(floor as usize)?;
            let width = rows.first().map(Vec::len).unwrap_or(0);
            Some(MapDimensions::new(width as u32, rows.len() as u32))
        }

        fn tile(&self, floor: u32, position: Position) -> Option<StaticTile> {
            if position.x < 0 || position.y < 0 {
                return None;
            }
            self.floors
                .get(floor as usize)?
                .get(position.y as usize)?
                .get(position.x as usize)
                .map(|terrain| StaticTile::new(*terrain))
        }
    }

    pub const POTION: ItemHandle = ItemHandle(0);
    pub const LIGHTNING: ItemHandle = ItemHandle(1);
    pub const CONFUSION: ItemHandle = ItemHandle(2);
    pub const FIREBALL: ItemHandle = ItemHandle(3);
    pub const SWORD: ItemHandle = ItemHandle(4);
    pub const MAIL: ItemHandle = ItemHandle(5);

    pub struct Items;

    impl ItemOracle for Items {
        fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
            let (name, kind, max_stack) = match handle {
                POTION => ("Health Potion", ItemKind::Consumable(ConsumableEffect::Heal(4)), 10),
                LIGHTNING => (
                    "Lightning Scroll",
                    ItemKind::Consumable(ConsumableEffect::Lightning { damage: 20, range: 5 }),
                    10,
                ),
                CONFUSION => (
                    "Confusion Scroll",
                    ItemKind::Consumable(ConsumableEffect::Confusion { turns: 3 }),
                    10,
                ),
                FIREBALL => (
                    "Fireball Scroll",
                    ItemKind::Consumable(ConsumableEffect::Fireball { damage: 12, radius: 1 }),
                    10,
                ),
                SWORD => ("Sword", ItemKind::Weapon { power_bonus: 4 }, 1),
                MAIL => ("Chain Mail", ItemKind::Armor { defense_bonus: 3 }, 1),
                _ => return None,
            };
            Some(ItemDefinition::new(handle, name, kind, max_stack))
        }
    }

    pub const ROOM: &[&str] = &[
        "#######", //
        "#.....#", //
        "#.....#", //
        "#..>..#", //
        "#######",
    ];

    pub const CELLAR: &[&str] = &[
        "#####", //
        "#<..#", //
        "#####",
    ];

    pub struct Fixture {
        pub map: AsciiMap,
        pub items: Items,
        pub rng: PcgRng,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                map: AsciiMap::new(&[ROOM, CELLAR]),
                items: Items,
                rng: PcgRng,
            }
        }

        pub fn env(&self) -> crate::env::GameEnv<'_> {
            crate::env::Env::with_all(&self.map, &self.items, &self.rng).as_game_env()
        }
    }

    /// Player at (1,1) with 30 HP, power 5, defense 1; everything visible.
    pub fn state_with(npcs: Vec<ActorState>) -> GameState {
        let player = ActorState::player("Player", Position::new(1, 1), 30).with_combat(5, 1);
        let mut world = WorldState::new(0);
        let visible: BTreeSet<Position> = (0..7)
            .flat_map(|x| (0..5).map(move |y| Position::new(x, y)))
            .collect();
        world.update_visibility(visible);
        GameState::new(7, EntitiesState::new(player, npcs, Vec::new()), world)
    }

    pub fn orc(id: u32, position: Position) -> ActorState {
        ActorState::new(EntityId(id), "orc", position, 10).with_combat(3, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::narration::Message;
    use crate::state::{Direction, Position};

    #[test]
    fn delay_scales_with_speed() {
        let state = state_with(vec![
            orc(1, Position::new(4, 2)).with_speed(crate::state::Speed::new(20).unwrap()),
        ]);
        let player_wait = Action::from(WaitAction::new(EntityId::PLAYER));
        let orc_wait = Action::from(WaitAction::new(EntityId(1)));
        let pickup = Action::from(PickupAction::new(EntityId::PLAYER));

        assert_eq!(player_wait.delay(&state), Some(Tick(10)));
        assert_eq!(orc_wait.delay(&state), Some(Tick(5)));
        assert_eq!(pickup.delay(&state), Some(Tick(5)));
        assert_eq!(Action::from(WaitAction::new(EntityId(9))).delay(&state), None);
    }

    #[test]
    fn take_delay_keeps_the_remainder_on_the_actor() {
        let mut state = state_with(vec![
            orc(1, Position::new(4, 2)).with_speed(crate::state::Speed::new(30).unwrap()),
        ]);
        let wait = Action::from(WaitAction::new(EntityId(1)));

        assert_eq!(wait.delay(&state), Some(Tick(3)));
        assert_eq!(wait.take_delay(&mut state), Some(Tick(3)));
        assert_eq!(state.entities.npcs[0].delay_carry, 10);
        assert_eq!(wait.take_delay(&mut state), Some(Tick(3)));
        // The preview sees the accumulated carry without consuming it.
        assert_eq!(wait.delay(&state), Some(Tick(4)));
        assert_eq!(wait.take_delay(&mut state), Some(Tick(4)));
        assert_eq!(state.entities.npcs[0].delay_carry, 0);
        assert_eq!(Action::from(WaitAction::new(EntityId(9))).take_delay(&mut state), None);
    }

    #[test]
    fn execute_bumps_nonce_only_on_success() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        let mut log: Vec<Message> = Vec::new();

        let into_wall = Action::from(MoveAction::new(EntityId::PLAYER, Direction::North));
        assert!(!into_wall.is_valid(&state, &env));
        let err = into_wall.execute(&mut state, &env, &mut log).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(state.nonce, 0);

        let step = Action::from(MoveAction::new(EntityId::PLAYER, Direction::East));
        assert_eq!(step.execute(&mut state, &env, &mut log), Ok(ActionOutcome::Performed));
        assert_eq!(state.nonce, 1);
        assert_eq!(state.entities.player.position, Position::new(2, 1));
    }

    #[test]
    fn dead_actors_cannot_act() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut corpse = orc(1, Position::new(4, 2));
        corpse.health.current = 0;
        let state = state_with(vec![corpse]);

        let wait = Action::from(WaitAction::new(EntityId(1)));
        assert_eq!(wait.validate(&state, &env), Err(ActionError::ActorDead(EntityId(1))));
    }

    #[test]
    fn kind_names_variants() {
        assert_eq!(Action::from(WaitAction::new(EntityId::PLAYER)).kind(), "wait");
        assert_eq!(
            Action::from(UseItemAction::new(EntityId::PLAYER, 0, None)).kind(),
            "use_item"
        );
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("orc"), "Orc");
        assert_eq!(capitalize(""), "");
    }
}
