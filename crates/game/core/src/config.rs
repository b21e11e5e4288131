use crate::geometry::Vec2;

/// Game configuration constants and tunable parameters.
///
/// Defaults are tuned for a 640×576 world at 60 fps. Timing values are
/// in seconds, distances in world pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seed for procedural decoration placement. Restart reuses it.
    pub seed: u64,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub timing: TimingConfig,
    pub interaction: InteractionConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 6;
    pub const MAX_NOTICES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            timing: TimingConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Size of the playable area; the player is clamped to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// How close (px) the player's right edge must get to the right bound to
    /// count as touching it.
    pub edge_tolerance: f32,
    /// Entry x coordinate after an area transition.
    pub entry_x: f32,
    /// Vertical band the player is clamped into on entry.
    pub entry_min_y: f32,
    pub entry_bottom_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 576.0,
            edge_tolerance: 2.0,
            entry_x: 8.0,
            entry_min_y: 40.0,
            entry_bottom_margin: 60.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub start: Vec2,
    /// Bounding box; matches one sprite frame.
    pub size: Vec2,
    /// Pixels per second.
    pub base_speed: f32,
    pub sprint_multiplier: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(100.0, 100.0),
            size: Vec2::new(32.0, 50.0),
            base_speed: 180.0,
            sprint_multiplier: 1.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Upper bound on a single tick; bounds the per-step displacement.
    pub max_tick: f32,
    /// Delay between walk frames.
    pub frame_delay: f32,
    /// Duration of each half (out / in) of an area fade.
    pub fade_duration: f32,
    pub notice_duration: f32,
    pub locked_notice_duration: f32,
    /// Delay between entering a hazard area and the fall.
    pub hazard_delay: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_tick: 0.033,
            frame_delay: 0.15,
            fade_duration: 0.25,
            notice_duration: 2.5,
            locked_notice_duration: 1.6,
            hazard_delay: 1.5,
        }
    }
}

/// Activation margins (edge-to-edge pixels) for proximity checks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    pub npc_margin: f32,
    pub item_margin: f32,
    pub gate_margin: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            npc_margin: 10.0,
            item_margin: 12.0,
            gate_margin: 14.0,
        }
    }
}
