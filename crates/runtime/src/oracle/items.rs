//! [`game_core::ItemOracle`] backed by an in-memory map.
use std::collections::HashMap;

use game_core::{ConsumableEffect, ItemDefinition, ItemHandle, ItemKind, ItemOracle};

/// ItemOracle implementation with static item definitions
#[derive(Clone, Debug, Default)]
pub struct ItemOracleImpl {
    definitions: HashMap<ItemHandle, ItemDefinition>,
}

impl ItemOracleImpl {
    pub const HEALTH_POTION: ItemHandle = ItemHandle(0);
    pub const LIGHTNING_SCROLL: ItemHandle = ItemHandle(1);
    pub const CONFUSION_SCROLL: ItemHandle = ItemHandle(2);
    pub const FIREBALL_SCROLL: ItemHandle = ItemHandle(3);
    pub const DAGGER: ItemHandle = ItemHandle(4);
    pub const SWORD: ItemHandle = ItemHandle(5);
    pub const LEATHER_ARMOR: ItemHandle = ItemHandle(6);
    pub const CHAIN_MAIL: ItemHandle = ItemHandle(7);

    pub fn new() -> Self {
        Self::default()
    }

    /// The stock catalogue: four consumables, two weapons, two armours.
    pub fn standard() -> Self {
        let mut oracle = Self::new();
        let consumable = |handle: ItemHandle, name: &str, effect: ConsumableEffect| {
            ItemDefinition::new(handle, name, ItemKind::Consumable(effect), 5)
        };

        oracle.add_definition(consumable(
            Self::HEALTH_POTION,
            "Health Potion",
            ConsumableEffect::Heal(4),
        ));
        oracle.add_definition(consumable(
            Self::LIGHTNING_SCROLL,
            "Lightning Scroll",
            ConsumableEffect::Lightning {
                damage: 20,
                range: 5,
            },
        ));
        oracle.add_definition(consumable(
            Self::CONFUSION_SCROLL,
            "Confusion Scroll",
            ConsumableEffect::Confusion { turns: 10 },
        ));
        oracle.add_definition(consumable(
            Self::FIREBALL_SCROLL,
            "Fireball Scroll",
            ConsumableEffect::Fireball {
                damage: 12,
                radius: 3,
            },
        ));
        oracle.add_definition(ItemDefinition::new(
            Self::DAGGER,
            "Dagger",
            ItemKind::Weapon { power_bonus: 2 },
            1,
        ));
        oracle.add_definition(ItemDefinition::new(
            Self::SWORD,
            "Sword",
            ItemKind::Weapon { power_bonus: 4 },
            1,
        ));
        oracle.add_definition(ItemDefinition::new(
            Self::LEATHER_ARMOR,
            "Leather Armor",
            ItemKind::Armor { defense_bonus: 1 },
            1,
        ));
        oracle.add_definition(ItemDefinition::new(
            Self::CHAIN_MAIL,
            "Chain Mail",
            ItemKind::Armor { defense_bonus: 3 },
            1,
        ));
        oracle
    }

    /// Add an item definition, replacing any previous one with the same handle.
    pub fn add_definition(&mut self, definition: ItemDefinition) {
        self.definitions.insert(definition.handle, definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions.get(&handle).cloned()
    }
}
