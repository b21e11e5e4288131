//! Error types surfaced by the engine.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::InventoryError;

/// Identifies which stage of a tick produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    Session,
    Commands,
    Zone,
}

impl TickPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickPhase::Session => "session",
            TickPhase::Commands => "commands",
            TickPhase::Zone => "zone",
        }
    }
}

impl core::fmt::Display for TickPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while starting a session or running a tick.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{phase} failed: {source}")]
    Oracle {
        phase: TickPhase,
        #[source]
        source: OracleError,
    },

    #[error("inventory command failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl EngineError {
    pub fn oracle(phase: TickPhase, source: OracleError) -> Self {
        Self::Oracle { phase, source }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle { source, .. } => source.severity(),
            Self::Inventory(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle { source, .. } => source.error_code(),
            Self::Inventory(error) => error.error_code(),
        }
    }
}
