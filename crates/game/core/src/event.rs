//! Observable occurrences produced by a tick.

use crate::input::Command;
use crate::state::{AreaId, GateKind, InventoryError, ItemKind, NpcKind};

/// Something that happened during a tick, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    CoinCollected {
        total: u32,
    },
    ItemPickedUp {
        kind: ItemKind,
        /// Quantity held after the pickup.
        total: u32,
    },
    /// An item was in reach but the pack had no free slot.
    PackFull {
        kind: ItemKind,
    },
    ItemUsed {
        kind: ItemKind,
        remaining: u32,
    },
    ItemDropped {
        kind: ItemKind,
        quantity: u32,
    },
    GateOpened {
        gate: GateKind,
    },
    /// Interacted with a locked gate without its key.
    GateLocked {
        gate: GateKind,
    },
    DialogueOpened {
        npc: NpcKind,
    },
    DialogueAdvanced {
        line: usize,
    },
    DialogueClosed {
        npc: NpcKind,
    },
    InventoryToggled {
        open: bool,
    },
    TransitionStarted {
        from: AreaId,
        to: AreaId,
    },
    /// The new area is mounted; the screen is still dark.
    AreaEntered {
        area: AreaId,
    },
    /// The fade-in finished and control is back with the player.
    TransitionFinished {
        area: AreaId,
    },
    HazardTriggered {
        area: AreaId,
    },
    Died,
    Restarted,
    /// An inventory command named an item the player does not hold, or a
    /// key away from its gate.
    CommandRejected {
        command: Command,
        error: InventoryError,
    },
}

/// Everything a single tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
