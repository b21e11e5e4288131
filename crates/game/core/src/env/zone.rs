use crate::geometry::{Rect, Vec2};
use crate::state::{AreaId, ExitRule, GateKind, GateLock, Hazard, ItemKind, NpcKind, QuestFlags};

/// Supplies the static content of each area.
pub trait ZoneOracle: Send + Sync {
    /// Builds the layout for `area`. `seed` drives any procedural placement
    /// and must give the same layout for the same inputs.
    fn layout(&self, area: AreaId, seed: u64) -> Option<AreaLayout>;
}

/// Everything needed to mount an area.
///
/// Decorations are given as ground anchors; the [`DecorationOracle`]
/// turns them into visuals and colliders.
///
/// [`DecorationOracle`]: super::DecorationOracle
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AreaLayout {
    pub area: AreaId,
    pub walls: Vec<Rect>,
    pub rocks: Vec<Rect>,
    /// Bottom-centre anchors for trees.
    pub tree_anchors: Vec<Vec2>,
    /// Bottom-left anchors for tents.
    pub tent_anchors: Vec<Vec2>,
    pub npcs: Vec<NpcSpawn>,
    pub items: Vec<ItemSpawn>,
    pub coins: Vec<Rect>,
    pub gates: Vec<GateSpawn>,
    pub exits: Vec<ExitRule>,
    pub hazard: Option<Hazard>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSpawn {
    pub kind: NpcKind,
    pub bounds: Rect,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpawn {
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u32,
    pub bounds: Rect,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateSpawn {
    pub kind: GateKind,
    pub bounds: Rect,
    pub lock: GateLock,
    pub flag: QuestFlags,
}
