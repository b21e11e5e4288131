//! Player inventory.
//!
//! Slots are unique by [`ItemKind`]: picking up a duplicate raises the
//! existing quantity. A slot never holds zero; it is removed instead.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::common::ItemKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub kind: ItemKind,
    pub quantity: u32,
}

impl InventorySlot {
    pub fn new(kind: ItemKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },

    #[error("{0} is not in the inventory")]
    NotHeld(ItemKind),

    #[error("{0} has no use here")]
    NoUse(ItemKind),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } => ErrorSeverity::Recoverable,
            Self::NotHeld(_) | Self::NoUse(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "INVENTORY_FULL",
            Self::NotHeld(_) => "INVENTORY_NOT_HELD",
            Self::NoUse(_) => "INVENTORY_NO_USE",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging into an existing slot of the same kind.
    ///
    /// Returns the slot's new quantity. A zero quantity is treated as one.
    pub fn add(&mut self, kind: ItemKind, quantity: u32) -> Result<u32, InventoryError> {
        let quantity = quantity.max(1);
        if let Some(slot) = self.slot_mut(kind) {
            slot.quantity = slot.quantity.saturating_add(quantity);
            return Ok(slot.quantity);
        }
        self.slots
            .try_push(InventorySlot::new(kind, quantity))
            .map_err(|_| InventoryError::Full {
                capacity: GameConfig::MAX_INVENTORY_SLOTS,
            })?;
        Ok(quantity)
    }

    /// Whether `kind` could be added without error.
    pub fn can_accept(&self, kind: ItemKind) -> bool {
        self.slot(kind).is_some() || !self.slots.is_full()
    }

    /// Removes one unit; the slot disappears at zero. Returns what is left.
    pub fn consume_one(&mut self, kind: ItemKind) -> Result<u32, InventoryError> {
        let index = self
            .index_of(kind)
            .ok_or(InventoryError::NotHeld(kind))?;
        let slot = &mut self.slots[index];
        slot.quantity = slot.quantity.saturating_sub(1);
        let remaining = slot.quantity;
        if remaining == 0 {
            self.slots.remove(index);
        }
        Ok(remaining)
    }

    /// Removes the whole slot, returning it.
    pub fn take(&mut self, kind: ItemKind) -> Result<InventorySlot, InventoryError> {
        let index = self
            .index_of(kind)
            .ok_or(InventoryError::NotHeld(kind))?;
        Ok(self.slots.remove(index))
    }

    pub fn quantity(&self, kind: ItemKind) -> u32 {
        self.slot(kind).map_or(0, |slot| slot.quantity)
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn slot(&self, kind: ItemKind) -> Option<&InventorySlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_mut(&mut self, kind: ItemKind) -> Option<&mut InventorySlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    fn index_of(&self, kind: ItemKind) -> Option<usize> {
        self.slots.iter().position(|slot| slot.kind == kind)
    }
}
