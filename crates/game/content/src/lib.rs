//! Built-in game content and data loaders.
//!
//! This crate implements the game-core oracles for the three areas of the
//! world:
//! - area layouts with seeded tree and coin placement ([`AreaCatalog`])
//! - tree and tent geometry ([`DecorationPlanner`])
//! - NPC dialogue tables ([`DialogueTable`])
//! - item names, icons and use texts ([`ItemCatalog`])
//!
//! With the `loaders` feature, configuration (TOML), item catalogs and area
//! layouts (RON) can be read from a data directory instead.

pub mod areas;
pub mod bundle;
pub mod decorations;
pub mod dialogue;
pub mod items;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use areas::AreaCatalog;
pub use bundle::ContentBundle;
pub use decorations::{DecorationPlanner, SpriteFootprint};
pub use dialogue::{COIN_QUEST_TARGET, DialogueResolver, DialogueTable};
pub use items::ItemCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{AreaLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult};
