//! Inventory system for actors.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::ItemHandle;

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub handle: ItemHandle,
    pub quantity: u16,
}

impl InventorySlot {
    pub fn new(handle: ItemHandle, quantity: u16) -> Self {
        Self { handle, quantity }
    }
}

/// Fixed-capacity item storage. Identical items stack into one slot.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub items: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self {
            items: ArrayVec::new(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Total units of `handle` held across all slots.
    pub fn count(&self, handle: ItemHandle) -> u32 {
        self.items
            .iter()
            .filter(|slot| slot.handle == handle)
            .map(|slot| u32::from(slot.quantity))
            .sum()
    }

    /// Returns true if one more unit of `handle` fits, given its stack limit.
    pub fn can_accept(&self, handle: ItemHandle, max_stack: u16) -> bool {
        self.stack_target(handle, max_stack).is_some() || !self.is_full()
    }

    /// Adds one unit, stacking onto an existing slot when possible.
    ///
    /// Returns false when the inventory has no room.
    pub fn add(&mut self, handle: ItemHandle, max_stack: u16) -> bool {
        if let Some(index) = self.stack_target(handle, max_stack) {
            self.items[index].quantity += 1;
            return true;
        }
        self.items.try_push(InventorySlot::new(handle, 1)).is_ok()
    }

    /// Removes one unit from the slot at `index`, dropping the slot when it empties.
    pub fn take_one(&mut self, index: usize) -> Option<ItemHandle> {
        let slot = self.items.get_mut(index)?;
        let handle = slot.handle;
        slot.quantity = slot.quantity.saturating_sub(1);
        if slot.quantity == 0 {
            self.items.remove(index);
        }
        Some(handle)
    }

    fn stack_target(&self, handle: ItemHandle, max_stack: u16) -> Option<usize> {
        self.items
            .iter()
            .position(|slot| slot.handle == handle && slot.quantity < max_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_until_limit_then_opens_new_slot() {
        let mut inventory = InventoryState::empty();
        let potion = ItemHandle(1);

        assert!(inventory.add(potion, 2));
        assert!(inventory.add(potion, 2));
        assert_eq!(inventory.len(), 1);

        assert!(inventory.add(potion, 2));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.count(potion), 3);
    }

    #[test]
    fn full_inventory_still_accepts_stackable_items() {
        let mut inventory = InventoryState::empty();
        for handle in 0..GameConfig::MAX_INVENTORY_SLOTS as u32 {
            assert!(inventory.add(ItemHandle(handle), 5));
        }
        assert!(inventory.is_full());
        assert!(inventory.can_accept(ItemHandle(0), 5));
        assert!(!inventory.can_accept(ItemHandle(999), 5));
        assert!(!inventory.add(ItemHandle(999), 5));
    }

    #[test]
    fn take_one_removes_emptied_slot() {
        let mut inventory = InventoryState::empty();
        inventory.add(ItemHandle(4), 1);
        inventory.add(ItemHandle(5), 1);

        assert_eq!(inventory.take_one(0), Some(ItemHandle(4)));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.slot(0).map(|slot| slot.handle), Some(ItemHandle(5)));
        assert_eq!(inventory.take_one(3), None);
    }
}
