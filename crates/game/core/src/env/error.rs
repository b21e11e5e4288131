//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::AreaId;

/// Errors that occur when accessing oracle data.
///
/// A missing oracle means the session was wired incorrectly, so these are
/// fatal: the engine cannot build or run an area without them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ZoneOracle not available")]
    ZoneNotAvailable,

    #[error("DecorationOracle not available")]
    DecorationsNotAvailable,

    #[error("DialogueOracle not available")]
    DialogueNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("SpriteOracle not available")]
    SpritesNotAvailable,

    /// The zone oracle has no layout for the requested area.
    #[error("no layout for {0}")]
    UnknownArea(AreaId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ZoneNotAvailable => "ORACLE_ZONE_NOT_AVAILABLE",
            DecorationsNotAvailable => "ORACLE_DECORATIONS_NOT_AVAILABLE",
            DialogueNotAvailable => "ORACLE_DIALOGUE_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            SpritesNotAvailable => "ORACLE_SPRITES_NOT_AVAILABLE",
            UnknownArea(_) => "ORACLE_UNKNOWN_AREA",
        }
    }
}
