use game_core::{
    DecorationOracle, DialogueOracle, Env, GameConfig, GameEnv, ItemOracle, SpriteOracle,
    ZoneOracle,
};

use crate::areas::AreaCatalog;
use crate::decorations::DecorationPlanner;
use crate::dialogue::DialogueTable;
use crate::items::ItemCatalog;

/// Owns one of every content oracle.
///
/// Sprites are a presentation concern and are supplied by the frontend.
pub struct ContentBundle {
    pub areas: AreaCatalog,
    pub decorations: DecorationPlanner,
    pub dialogue: DialogueTable,
    pub items: ItemCatalog,
}

impl ContentBundle {
    pub fn standard(config: &GameConfig) -> Self {
        let decorations = DecorationPlanner::default();
        Self {
            areas: AreaCatalog::new(config).with_decorations(decorations),
            decorations,
            dialogue: DialogueTable::standard(),
            items: ItemCatalog::standard(),
        }
    }

    /// Borrows the bundle as an engine environment.
    pub fn env<'a>(&'a self, sprites: Option<&'a dyn SpriteOracle>) -> GameEnv<'a> {
        let zones: &'a dyn ZoneOracle = &self.areas;
        let decorations: &'a dyn DecorationOracle = &self.decorations;
        let dialogue: &'a dyn DialogueOracle = &self.dialogue;
        let items: &'a dyn ItemOracle = &self.items;
        Env::new(
            Some(zones),
            Some(decorations),
            Some(dialogue),
            Some(items),
            sprites,
        )
    }
}
