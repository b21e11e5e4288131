//! Deterministic exploration rules shared by every frontend.
//!
//! `game-core` owns the geometry, collision, interaction, quest and area
//! rules, and exposes pure APIs that the runtime and offline tools reuse.
//! All state mutation flows through [`engine::GameEngine`]; content such as
//! area layouts, dialogue and item names is injected through the oracles in
//! [`env`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod state;
pub mod view;

pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, TickPhase};
pub use env::{
    AreaLayout, Decoration, DecorationOracle, DialogueOracle, Env, GameEnv, GateSpawn,
    ItemDefinition, ItemOracle, ItemSpawn, NpcSpawn, OracleError, PcgRng, SpriteOracle,
    ZoneOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{GameEvent, TickReport};
pub use geometry::{Rect, Vec2};
pub use input::{Command, HeldKeys, InputState, Key};
pub use state::{
    AreaId, DialogueContext, DialogueEffect, DialogueScript, EntityId, ExitRule, Facing,
    GameState, GateKind, GateLock, Hazard, InventoryError, InventorySlot, ItemKind, NpcKind,
    ObstacleTag, PropKind, QuestFlags, ZonePhase,
};
pub use view::GameView;
