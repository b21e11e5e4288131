use crate::geometry::Rect;

use super::common::{AreaId, EntityId, GateKind, ItemKind, NpcKind};
use super::quest::QuestFlags;

/// Every dynamic thing mounted in the active area.
///
/// Cleared wholesale when the area unmounts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub npcs: Vec<NpcState>,
    pub items: Vec<WorldItem>,
    pub coins: Vec<CoinState>,
    pub gates: Vec<GateState>,
    pub props: Vec<PropState>,
}

impl EntitiesState {
    pub fn npc(&self, id: EntityId) -> Option<&NpcState> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn item(&self, id: EntityId) -> Option<&WorldItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn gate(&self, kind: GateKind) -> Option<&GateState> {
        self.gates.iter().find(|gate| gate.kind == kind)
    }

    pub fn remove_item(&mut self, id: EntityId) -> Option<WorldItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn remove_gate(&mut self, kind: GateKind) -> Option<GateState> {
        let index = self.gates.iter().position(|gate| gate.kind == kind)?;
        Some(self.gates.remove(index))
    }

    /// Removes every prop of `kind`; returns how many were removed.
    pub fn remove_props(&mut self, kind: PropKind) -> usize {
        let before = self.props.len();
        self.props.retain(|prop| prop.kind != kind);
        before - self.props.len()
    }

    pub fn clear(&mut self) {
        self.npcs.clear();
        self.items.clear();
        self.coins.clear();
        self.gates.clear();
        self.props.clear();
    }
}

/// Static character; never moves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcState {
    pub id: EntityId,
    pub kind: NpcKind,
    pub bounds: Rect,
}

/// Pickup lying in the world. Dropped stacks keep their quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub id: EntityId,
    pub kind: ItemKind,
    pub quantity: u32,
    pub bounds: Rect,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinState {
    pub id: EntityId,
    pub bounds: Rect,
}

/// How a gate gets opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateLock {
    /// Opened by a dialogue completion effect.
    Quest,
    /// Opened by interacting while holding one unit of the item.
    Key(ItemKind),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateState {
    pub kind: GateKind,
    pub bounds: Rect,
    pub lock: GateLock,
    /// Flag raised once the gate opens.
    pub flag: QuestFlags,
    pub area: AreaId,
}

impl GateState {
    pub fn required_key(&self) -> Option<ItemKind> {
        match self.lock {
            GateLock::Key(item) => Some(item),
            GateLock::Quest => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PropKind {
    Tree,
    Tent,
}

/// Decoration drawn in the world. Its collider lives in the registry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub kind: PropKind,
    pub visual: Rect,
}
