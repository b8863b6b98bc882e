use crate::state::ItemHandle;

/// Read-only catalogue of item definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;
}

/// Item definition shared by every instance carrying the same handle.
///
/// Equipment never stacks (`max_stack = 1`); consumables stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub kind: ItemKind,
    pub max_stack: u16,
}

impl ItemDefinition {
    pub fn new(
        handle: ItemHandle,
        name: impl Into<String>,
        kind: ItemKind,
        max_stack: u16,
    ) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
            max_stack,
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable(_))
    }

    pub fn is_equippable(&self) -> bool {
        self.kind.equipment_slot().is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Consumable(ConsumableEffect),
    Weapon { power_bonus: u32 },
    Armor { defense_bonus: u32 },
}

impl ItemKind {
    pub fn equipment_slot(self) -> Option<crate::state::EquipmentSlot> {
        use crate::state::EquipmentSlot;
        match self {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            ItemKind::Armor { .. } => Some(EquipmentSlot::Armor),
            ItemKind::Consumable(_) => None,
        }
    }
}

/// What happens when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore up to `amount` health to the user.
    Heal(u32),
    /// Strike the closest visible enemy within `range`.
    Lightning { damage: u32, range: u32 },
    /// Confuse the actor at the chosen target position.
    Confusion { turns: u32 },
    /// Damage every living actor within `radius` of the chosen target position.
    Fireball { damage: u32, radius: u32 },
}

impl ConsumableEffect {
    /// Whether using the item needs a target position chosen by the user.
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            ConsumableEffect::Confusion { .. } | ConsumableEffect::Fireball { .. }
        )
    }
}
