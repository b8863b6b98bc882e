//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`ActionError`, `QueueError`, `OracleError`) live next
//! to the code that raises them. This module holds the classification shared by
//! all of them, which the orchestrator uses to separate the recoverable
//! "that cannot be done right now" channel from genuine defects.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the world refused the intent; report it and carry on
/// - **Validation**: the intent itself is malformed
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected refusal, e.g. walking into a wall or drinking at full health.
    Recoverable,

    /// Invalid input, should not retry without changes.
    Validation,

    /// Unexpected state inconsistency, e.g. an intent naming a missing actor.
    Internal,

    /// Missing oracle or broken scheduling discipline.
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

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and tests. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
