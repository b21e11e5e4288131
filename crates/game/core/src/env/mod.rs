//! Traits describing read-only content and presentation collaborators.
//!
//! Oracles expose area layouts, decoration geometry, dialogue tables, item
//! definitions, and sprite metadata. The [`Env`] aggregate bundles them so
//! the engine can reach everything it needs without coupling to concrete
//! implementations.
mod error;
mod providers;
mod rng;
mod zone;

pub use error::OracleError;
pub use providers::{
    Decoration, DecorationOracle, DialogueOracle, ItemDefinition, ItemOracle, SpriteOracle,
};
pub use rng::{PcgRng, compute_seed};
pub use zone::{AreaLayout, GateSpawn, ItemSpawn, NpcSpawn, ZoneOracle};

use crate::state::Facing;

/// Aggregates the read-only oracles required by the engine.
pub struct Env<'a, Z, D, L, I, S>
where
    Z: ZoneOracle + ?Sized,
    D: DecorationOracle + ?Sized,
    L: DialogueOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: SpriteOracle + ?Sized,
{
    zones: Option<&'a Z>,
    decorations: Option<&'a D>,
    dialogue: Option<&'a L>,
    items: Option<&'a I>,
    sprites: Option<&'a S>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn ZoneOracle + 'a,
    dyn DecorationOracle + 'a,
    dyn DialogueOracle + 'a,
    dyn ItemOracle + 'a,
    dyn SpriteOracle + 'a,
>;

impl<Z, D, L, I, S> Clone for Env<'_, Z, D, L, I, S>
where
    Z: ZoneOracle + ?Sized,
    D: DecorationOracle + ?Sized,
    L: DialogueOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: SpriteOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

// Holds only references; the oracles themselves need not be Clone.
impl<Z, D, L, I, S> Copy for Env<'_, Z, D, L, I, S>
where
    Z: ZoneOracle + ?Sized,
    D: DecorationOracle + ?Sized,
    L: DialogueOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: SpriteOracle + ?Sized,
{
}

impl<'a, Z, D, L, I, S> Env<'a, Z, D, L, I, S>
where
    Z: ZoneOracle + ?Sized,
    D: DecorationOracle + ?Sized,
    L: DialogueOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: SpriteOracle + ?Sized,
{
    pub fn new(
        zones: Option<&'a Z>,
        decorations: Option<&'a D>,
        dialogue: Option<&'a L>,
        items: Option<&'a I>,
        sprites: Option<&'a S>,
    ) -> Self {
        Self {
            zones,
            decorations,
            dialogue,
            items,
            sprites,
        }
    }

    pub fn with_all(
        zones: &'a Z,
        decorations: &'a D,
        dialogue: &'a L,
        items: &'a I,
        sprites: &'a S,
    ) -> Self {
        Self::new(
            Some(zones),
            Some(decorations),
            Some(dialogue),
            Some(items),
            Some(sprites),
        )
    }

    pub fn empty() -> Self {
        Self {
            zones: None,
            decorations: None,
            dialogue: None,
            items: None,
            sprites: None,
        }
    }

    /// Returns the ZoneOracle, or an error if not available.
    pub fn zones(&self) -> Result<&'a Z, OracleError> {
        self.zones.ok_or(OracleError::ZoneNotAvailable)
    }

    /// Returns the DecorationOracle, or an error if not available.
    pub fn decorations(&self) -> Result<&'a D, OracleError> {
        self.decorations.ok_or(OracleError::DecorationsNotAvailable)
    }

    /// Returns the DialogueOracle, or an error if not available.
    pub fn dialogue(&self) -> Result<&'a L, OracleError> {
        self.dialogue.ok_or(OracleError::DialogueNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the SpriteOracle, or an error if not available.
    pub fn sprites(&self) -> Result<&'a S, OracleError> {
        self.sprites.ok_or(OracleError::SpritesNotAvailable)
    }

    /// Walk-frame count for `facing`; zero when no sprite provider is wired,
    /// which freezes the walk cycle instead of failing the tick.
    pub fn walk_frames(&self, facing: Facing) -> usize {
        self.sprites
            .map(|sprites| sprites.walk_frames(facing))
            .unwrap_or(0)
    }
}

impl<'a, Z, D, L, I, S> Env<'a, Z, D, L, I, S>
where
    Z: ZoneOracle + 'a,
    D: DecorationOracle + 'a,
    L: DialogueOracle + 'a,
    I: ItemOracle + 'a,
    S: SpriteOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let zones: Option<&'a dyn ZoneOracle> = self.zones.map(|zones| zones as _);
        let decorations: Option<&'a dyn DecorationOracle> =
            self.decorations.map(|decorations| decorations as _);
        let dialogue: Option<&'a dyn DialogueOracle> = self.dialogue.map(|dialogue| dialogue as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let sprites: Option<&'a dyn SpriteOracle> = self.sprites.map(|sprites| sprites as _);
        Env::new(zones, decorations, dialogue, items, sprites)
    }
}
