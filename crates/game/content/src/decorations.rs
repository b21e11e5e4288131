//! Tree and tent geometry.
//!
//! Sprites are drawn from a ground anchor; only a small base collider blocks
//! movement so the player can walk "behind" the canopy.

use game_core::{Decoration, DecorationOracle, Rect, Vec2};

/// Pixel size of a decoration sprite plus the fraction of it that collides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteFootprint {
    pub size: Vec2,
    /// Collider width as a fraction of the sprite width.
    pub base_width: f32,
    /// Collider height as a fraction of the sprite height.
    pub base_height: f32,
}

impl SpriteFootprint {
    pub const PINE: Self = Self {
        size: Vec2::new(64.0, 63.0),
        base_width: 0.28,
        base_height: 0.18,
    };

    pub const TENT: Self = Self {
        size: Vec2::new(96.0, 80.0),
        base_width: 0.6,
        base_height: 0.22,
    };

    fn collider_size(&self) -> Vec2 {
        Vec2::new(
            (self.size.x * self.base_width).floor(),
            (self.size.y * self.base_height).floor(),
        )
    }
}

/// Places trees and tents from their anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationPlanner {
    pub tree: SpriteFootprint,
    pub tent: SpriteFootprint,
    /// Gap between the bottom of a tree sprite and its trunk collider.
    pub trunk_lift: f32,
}

impl Default for DecorationPlanner {
    fn default() -> Self {
        Self {
            tree: SpriteFootprint::PINE,
            tent: SpriteFootprint::TENT,
            trunk_lift: 2.0,
        }
    }
}

impl DecorationPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree sprite for a bottom-centre anchor.
    ///
    /// The ground point is pushed down so a tree near the top edge stays
    /// fully on screen.
    pub fn tree_visual(&self, anchor: Vec2) -> Rect {
        let size = self.tree.size;
        let base_y = anchor.y.max(size.y + 2.0);
        Rect::new(
            (anchor.x - size.x / 2.0).round(),
            (base_y - size.y).round(),
            size.x,
            size.y,
        )
    }

    pub fn tree(&self, anchor: Vec2) -> Decoration {
        let visual = self.tree_visual(anchor);
        let trunk = self.tree.collider_size();
        Decoration {
            visual,
            collider: Rect::new(
                visual.x + (visual.w - trunk.x) / 2.0,
                visual.bottom() - self.trunk_lift - trunk.y,
                trunk.x,
                trunk.y,
            ),
        }
    }

    /// Tent for a bottom-left anchor.
    pub fn tent(&self, anchor: Vec2) -> Decoration {
        let size = self.tent.size;
        let base = self.tent.collider_size();
        Decoration {
            visual: Rect::new(anchor.x, anchor.y - size.y, size.x, size.y),
            collider: Rect::new(
                anchor.x + ((size.x - base.x) / 2.0).floor(),
                anchor.y - base.y,
                base.x,
                base.y,
            ),
        }
    }
}

impl DecorationOracle for DecorationPlanner {
    fn trees(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors.iter().map(|anchor| self.tree(*anchor)).collect()
    }

    fn tents(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors.iter().map(|anchor| self.tent(*anchor)).collect()
    }
}
