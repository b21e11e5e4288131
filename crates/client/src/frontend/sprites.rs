//! Glyph walk cycles for the terminal player sprite.

use std::collections::HashMap;

use game_core::{Facing, SpriteOracle};
use tracing::warn;

/// Per-facing walk frames drawn as single characters.
#[derive(Clone, Debug)]
pub struct GlyphSprites {
    walk: HashMap<Facing, Vec<char>>,
    idle: char,
}

impl GlyphSprites {
    /// Facings without frames still work: the walk cycle stays on frame 0
    /// and nothing is drawn for them.
    pub fn new(walk: HashMap<Facing, Vec<char>>, idle: char) -> Self {
        for facing in Facing::ALL {
            if walk.get(&facing).is_none_or(Vec::is_empty) {
                warn!(%facing, "No walk frames for facing; the player will not be drawn");
            }
        }
        Self { walk, idle }
    }

    pub fn standard() -> Self {
        Self::new(
            HashMap::from([
                (Facing::Down, vec!['▼', '▽']),
                (Facing::Up, vec!['▲', '△']),
                (Facing::Left, vec!['◀', '◁']),
                (Facing::Right, vec!['▶', '▷']),
            ]),
            '@',
        )
    }

    /// Character for the player this frame, if there is one to draw.
    pub fn glyph(&self, facing: Facing, moving: bool, frame: usize) -> Option<char> {
        let frames = self.walk.get(&facing).filter(|frames| !frames.is_empty())?;
        if !moving {
            return Some(self.idle);
        }
        frames.get(frame % frames.len()).copied()
    }
}

impl SpriteOracle for GlyphSprites {
    fn walk_frames(&self, facing: Facing) -> usize {
        self.walk.get(&facing).map_or(0, Vec::len)
    }
}
