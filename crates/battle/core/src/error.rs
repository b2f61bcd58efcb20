//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g. [`CombatError`](crate::CombatError),
//! [`DrawError`](crate::DrawError)) live next to the operations they guard.
//! This module provides the shared classification every one of them reports.
//!
//! # Design Principles
//!
//! - **Fail fast**: every operation validates its inputs before the first write,
//!   so a rejected call leaves the combatant exactly as it was
//! - **Distinguishable**: callers branch on [`ErrorKind`] rather than on
//!   message text

/// Classification of every failure surfaced by the engine or its drivers.
///
/// - **InvalidArgument**: a caller-supplied amount is out of range (negative
///   damage, heal or draw count)
/// - **IllegalTransition**: the operation is not legal in the current turn
///   state, or refers to a template/deck/combatant that does not exist
/// - **DataIntegrity**: the operation would break a catalog or roster
///   invariant (duplicate ids, dangling deck references)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    InvalidArgument,
    IllegalTransition,
    DataIntegrity,
}

impl ErrorKind {
    /// Returns a short machine-readable label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::IllegalTransition => "illegal_transition",
            Self::DataIntegrity => "data_integrity",
        }
    }

    /// Returns true if retrying with different input can succeed.
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::IllegalTransition)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all battle errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify by what the caller did wrong, not by how bad the outcome is
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the classification of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
