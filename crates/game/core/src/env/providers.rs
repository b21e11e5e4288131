use crate::geometry::{Rect, Vec2};
use crate::state::{DialogueContext, DialogueScript, Facing, ItemKind, NpcKind};

/// Turns ground anchors into decoration visuals and their colliders.
pub trait DecorationOracle: Send + Sync {
    /// Trees anchored at the bottom-centre of the sprite.
    fn trees(&self, anchors: &[Vec2]) -> Vec<Decoration>;

    /// Tents anchored at the bottom-left of the sprite.
    fn tents(&self, anchors: &[Vec2]) -> Vec<Decoration>;
}

/// A placed decoration. Only `collider` blocks movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub visual: Rect,
    pub collider: Rect,
}

/// Resolves what an NPC says given the current quest progress.
pub trait DialogueOracle: Send + Sync {
    fn resolve(&self, npc: NpcKind, context: &DialogueContext) -> DialogueScript;
}

pub trait ItemOracle: Send + Sync {
    fn definition(&self, kind: ItemKind) -> Option<ItemDefinition>;
}

/// Display data for an item kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub name: String,
    pub icon: String,
    /// Notice shown when the item is used.
    pub use_text: String,
}

/// Sprite/animation provider.
pub trait SpriteOracle: Send + Sync {
    /// Number of walk frames for `facing`. Zero when the sheet failed to load.
    fn walk_frames(&self, facing: Facing) -> usize;
}
