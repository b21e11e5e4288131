//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `InventoryError`, `OracleError`) are defined
//! in their respective modules alongside the operations they guard. Most
//! in-game failures are not errors at all: double triggers are ignored by
//! guards, stale obstacles are filtered, and death is a designed terminal
//! state. What remains is surfaced through the types here.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can retry or do something else
/// - **Validation**: the command referenced something that does not exist
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: required collaborators are missing, the session cannot run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: inventory full
    Recoverable,

    /// Examples: dropping an item that is not held
    Validation,

    /// Examples: an area layout references an unknown gate
    Internal,

    /// Examples: missing oracle, unknown starting area
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used by the runtime as a structured logging field.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
