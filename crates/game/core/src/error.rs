//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`MoveError`, `AttackError`, `StateError`, ...) live
//! next to the code that raises them; this module only provides the shared
//! classification used by the runtime when deciding how loudly to report a
//! failure.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player may simply try another command
/// - **Validation**: the command was malformed for the current situation
/// - **Internal**: bookkeeping went out of sync
/// - **Fatal**: the engine cannot continue without outside help
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination blocked, target out of reach.
    Recoverable,

    /// Examples: wrong phase, action already consumed.
    Validation,

    /// Examples: occupancy map desync, missing expected entity.
    Internal,

    /// Examples: missing map oracle, game already over.
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

    /// Returns true if this error indicates a bug or a dead session.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, handy in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
