//! Equipment slots for actors.
//!
//! Equipment references items by `ItemHandle`; the items themselves stay in
//! the actor's inventory while equipped.

use crate::state::types::ItemHandle;

/// Which equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// Equipment state for an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Currently equipped weapon.
    pub weapon: Option<ItemHandle>,

    /// Currently equipped armor.
    pub armor: Option<ItemHandle>,
}

impl Equipment {
    /// Creates empty equipment (no weapon or armor).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemHandle> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
        }
    }

    /// Puts `handle` into `slot`, returning whatever was there before.
    pub fn equip(&mut self, slot: EquipmentSlot, handle: ItemHandle) -> Option<ItemHandle> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.replace(handle),
            EquipmentSlot::Armor => self.armor.replace(handle),
        }
    }

    /// Empties `slot`, returning its previous contents.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemHandle> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.take(),
            EquipmentSlot::Armor => self.armor.take(),
        }
    }

    /// Returns the slot currently holding `handle`, if any.
    pub fn slot_of(&self, handle: ItemHandle) -> Option<EquipmentSlot> {
        if self.weapon == Some(handle) {
            Some(EquipmentSlot::Weapon)
        } else if self.armor == Some(handle) {
            Some(EquipmentSlot::Armor)
        } else {
            None
        }
    }

    pub fn is_equipped(&self, handle: ItemHandle) -> bool {
        self.slot_of(handle).is_some()
    }
}

/// Builder for constructing equipment.
#[derive(Default)]
pub struct EquipmentBuilder {
    weapon: Option<ItemHandle>,
    armor: Option<ItemHandle>,
}

impl EquipmentBuilder {
    /// Sets the weapon by item handle.
    pub fn weapon(mut self, handle: ItemHandle) -> Self {
        self.weapon = Some(handle);
        self
    }

    /// Sets the armor by item handle.
    pub fn armor(mut self, handle: ItemHandle) -> Self {
        self.armor = Some(handle);
        self
    }

    /// Builds the equipment.
    pub fn build(self) -> Equipment {
        Equipment {
            weapon: self.weapon,
            armor: self.armor,
        }
    }
}
