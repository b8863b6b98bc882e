//! Picking up, dropping and equipping items.

use crate::action::{ActionError, ActionOutcome, ActionTransition, actor_mut, living_actor};
use crate::config::GameConfig;
use crate::env::{GameEnv, ItemDefinition};
use crate::narration::{MessageSink, MessageStyle};
use crate::state::{EntityId, GameState, ItemHandle, ItemState, Tick};

/// Pick up the first item lying on the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAction {
    pub actor: EntityId,
}

impl PickupAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn item_here<'s>(&self, state: &'s GameState) -> Result<&'s ItemState, ActionError> {
        let actor = living_actor(state, self.actor)?;
        state
            .entities
            .items_at(actor.floor, actor.position)
            .next()
            .ok_or(ActionError::NothingToPickUp)
    }
}

impl ActionTransition for PickupAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn base_cost(&self) -> Tick {
        GameConfig::PICKUP_ACTION_COST
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let item = self.item_here(state)?;
        let definition = env.item(item.handle)?;
        let actor = living_actor(state, self.actor)?;
        if !actor.inventory.can_accept(item.handle, definition.max_stack) {
            return Err(ActionError::InventoryFull);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let item = self.item_here(state)?;
        let (item_id, handle) = (item.id, item.handle);
        let definition = env.item(handle)?;

        let actor = actor_mut(state, self.actor)?;
        if !actor.inventory.add(handle, definition.max_stack) {
            return Err(ActionError::InventoryFull);
        }
        state.entities.remove_item(item_id);
        sink.add_message(
            format!("You picked up the {}!", definition.name),
            MessageStyle::Normal,
        );
        Ok(ActionOutcome::Performed)
    }
}

/// Drop one unit from an inventory slot onto the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAction {
    pub actor: EntityId,
    pub slot: usize,
}

impl DropAction {
    pub fn new(actor: EntityId, slot: usize) -> Self {
        Self { actor, slot }
    }
}

impl ActionTransition for DropAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        slot_item(state, env, self.actor, self.slot).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let definition = slot_item(state, env, self.actor, self.slot)?;
        let handle = definition.handle;
        let id = state.allocate_entity_id();

        let actor = actor_mut(state, self.actor)?;
        if let Some(equipped) = actor.equipment.slot_of(handle) {
            if actor.inventory.count(handle) == 1 {
                actor.equipment.unequip(equipped);
                sink.add_message(
                    format!("You remove the {}.", definition.name),
                    MessageStyle::Normal,
                );
            }
        }
        actor
            .inventory
            .take_one(self.slot)
            .ok_or(ActionError::EmptySlot { slot: self.slot })?;
        let dropped = ItemState::new(id, actor.floor, actor.position, handle);
        state.entities.items.push(dropped);

        sink.add_message(
            format!("You dropped the {}.", definition.name),
            MessageStyle::Normal,
        );
        Ok(ActionOutcome::Performed)
    }
}

/// Toggle a weapon or armor: equip it, or unequip it if already worn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub actor: EntityId,
    pub slot: usize,
}

impl EquipAction {
    pub fn new(actor: EntityId, slot: usize) -> Self {
        Self { actor, slot }
    }
}

impl ActionTransition for EquipAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let definition = slot_item(state, env, self.actor, self.slot)?;
        if !definition.is_equippable() {
            return Err(ActionError::NotEquippable {
                name: definition.name,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let definition = slot_item(state, env, self.actor, self.slot)?;
        let Some(equipment_slot) = definition.kind.equipment_slot() else {
            return Err(ActionError::NotEquippable {
                name: definition.name,
            });
        };
        let handle = definition.handle;

        let current = living_actor(state, self.actor)?.equipment.get(equipment_slot);
        let previous_name = match current {
            Some(previous) if previous != handle => Some(env.item(previous)?.name),
            _ => None,
        };

        let actor = actor_mut(state, self.actor)?;
        if current == Some(handle) {
            actor.equipment.unequip(equipment_slot);
            sink.add_message(
                format!("You remove the {}.", definition.name),
                MessageStyle::Normal,
            );
            return Ok(ActionOutcome::Performed);
        }

        if let Some(name) = previous_name {
            sink.add_message(format!("You remove the {name}."), MessageStyle::Normal);
        }
        actor.equipment.equip(equipment_slot, handle);
        sink.add_message(
            format!("You equip the {}.", definition.name),
            MessageStyle::Normal,
        );
        Ok(ActionOutcome::Performed)
    }
}

/// Definition of the item in `slot` of a living actor's inventory.
pub(crate) fn slot_item(
    state: &GameState,
    env: &GameEnv<'_>,
    actor: EntityId,
    slot: usize,
) -> Result<ItemDefinition, ActionError> {
    let handle: ItemHandle = living_actor(state, actor)?
        .inventory
        .slot(slot)
        .ok_or(ActionError::EmptySlot { slot })?
        .handle;
    Ok(env.item(handle)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::test_support::*;
    use crate::narration::Message;
    use crate::state::Position;

    fn texts(log: &[Message]) -> Vec<&str> {
        log.iter().map(|message| message.text.as_str()).collect()
    }

    #[test]
    fn pickup_moves_item_into_inventory() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        state
            .entities
            .items
            .push(ItemState::new(EntityId(20), 0, Position::new(1, 1), POTION));
        let mut log: Vec<Message> = Vec::new();

        Action::from(PickupAction::new(EntityId::PLAYER))
            .execute(&mut state, &env, &mut log)
            .unwrap();

        assert!(state.entities.items.is_empty());
        assert_eq!(state.entities.player.inventory.count(POTION), 1);
        assert_eq!(texts(&log), vec!["You picked up the Health Potion!"]);
    }

    #[test]
    fn pickup_needs_an_item_and_room() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        let pickup = PickupAction::new(EntityId::PLAYER);
        assert_eq!(pickup.validate(&state, &env), Err(ActionError::NothingToPickUp));

        for _ in 0..GameConfig::MAX_INVENTORY_SLOTS {
            state.entities.player.inventory.add(SWORD, 1);
        }
        state
            .entities
            .items
            .push(ItemState::new(EntityId(20), 0, Position::new(1, 1), MAIL));
        assert_eq!(pickup.validate(&state, &env), Err(ActionError::InventoryFull));
    }

    #[test]
    fn drop_unequips_last_unit_first() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        state.entities.player.inventory.add(SWORD, 1);
        state.entities.player.equipment.weapon = Some(SWORD);
        let mut log: Vec<Message> = Vec::new();

        Action::from(DropAction::new(EntityId::PLAYER, 0))
            .execute(&mut state, &env, &mut log)
            .unwrap();

        assert_eq!(state.entities.player.equipment.weapon, None);
        assert!(state.entities.player.inventory.is_empty());
        assert_eq!(state.entities.items_at(0, Position::new(1, 1)).count(), 1);
        assert_eq!(texts(&log), vec!["You remove the Sword.", "You dropped the Sword."]);
    }

    #[test]
    fn drop_empty_slot_is_refused() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let state = state_with(Vec::new());
        assert_eq!(
            DropAction::new(EntityId::PLAYER, 3).validate(&state, &env),
            Err(ActionError::EmptySlot { slot: 3 })
        );
    }

    #[test]
    fn equip_toggles() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        state.entities.player.inventory.add(SWORD, 1);
        let equip = Action::from(EquipAction::new(EntityId::PLAYER, 0));
        let mut log: Vec<Message> = Vec::new();

        equip.execute(&mut state, &env, &mut log).unwrap();
        assert_eq!(state.entities.player.equipment.weapon, Some(SWORD));
        equip.execute(&mut state, &env, &mut log).unwrap();
        assert_eq!(state.entities.player.equipment.weapon, None);

        assert_eq!(texts(&log), vec!["You equip the Sword.", "You remove the Sword."]);
    }

    #[test]
    fn equip_rejects_consumables() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = state_with(Vec::new());
        state.entities.player.inventory.add(POTION, 10);

        let err = EquipAction::new(EntityId::PLAYER, 0)
            .validate(&state, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "The Health Potion cannot be equipped.");
    }
}
