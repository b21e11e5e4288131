//! Authoritative game state representation.
//!
//! One owned [`GameState`] holds everything a session mutates. Subsystems
//! receive it by reference from the engine; nothing else writes to it.
pub mod animation;
pub mod common;
pub mod dialogue;
pub mod entities;
pub mod inventory;
pub mod obstacles;
pub mod quest;
pub mod ui;
pub mod zone;

pub use animation::AnimationState;
pub use common::{AreaId, EntityId, Facing, GateKind, ItemKind, NpcKind};
pub use dialogue::{DialogueContext, DialogueEffect, DialogueScript, DialogueState, DialogueStep};
pub use entities::{
    CoinState, EntitiesState, GateLock, GateState, NpcState, PropKind, PropState, WorldItem,
};
pub use inventory::{InventoryError, InventorySlot, InventoryState};
pub use obstacles::{Obstacle, ObstacleError, ObstacleId, ObstacleRegistry, ObstacleTag};
pub use quest::{QuestFlags, QuestState};
pub use ui::{HintTarget, InteractionHint, Notice, UiState};
pub use zone::{ExitRule, FadeStage, Hazard, ZonePhase, ZoneState};

use crate::config::{GameConfig, PlayerConfig};
use crate::geometry::{Rect, Vec2};

/// Canonical snapshot of a play session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed for decoration scatter. Restart keeps it.
    pub seed: u64,

    /// Sequential entity ID allocator. Never reused; 0 is the player.
    next_entity_id: u32,

    pub player: PlayerState,
    pub obstacles: ObstacleRegistry,
    pub entities: EntitiesState,
    pub inventory: InventoryState,
    pub quest: QuestState,
    pub zone: ZoneState,
    pub dialogue: Option<DialogueState>,
    pub ui: UiState,
}

impl GameState {
    /// Creates a session with the player at the configured start and nothing
    /// mounted. The engine mounts the first area on top of this.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            seed: config.seed,
            next_entity_id: 1,
            player: PlayerState::from_config(&config.player),
            obstacles: ObstacleRegistry::new(),
            entities: EntitiesState::default(),
            inventory: InventoryState::empty(),
            quest: QuestState::default(),
            zone: ZoneState::default(),
            dialogue: None,
            ui: UiState::default(),
        }
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id = 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }

    /// Context handed to dialogue resolution.
    pub fn dialogue_context(&self) -> DialogueContext {
        DialogueContext {
            coins: self.quest.coins,
            flags: self.quest.flags,
            area: self.zone.area,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.zone.phase.is_dead()
    }
}

/// The controllable character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    /// Position (top-left) and fixed bounding box.
    pub bounds: Rect,
    pub base_speed: f32,
    pub sprint_multiplier: f32,
    /// Speed applied during the last movement step.
    pub speed: f32,
    pub animation: AnimationState,
}

impl PlayerState {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            bounds: Rect::at(config.start, config.size),
            base_speed: config.base_speed,
            sprint_multiplier: config.sprint_multiplier,
            speed: config.base_speed,
            animation: AnimationState::default(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.bounds.origin()
    }

    pub fn facing(&self) -> Facing {
        self.animation.facing
    }
}
