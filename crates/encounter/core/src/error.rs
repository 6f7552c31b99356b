//! Common error infrastructure for encounter-core.
//!
//! The encounter store itself never fails: unknown ids and out-of-range
//! initiative are silent no-ops and HP is clamped. Errors only exist at the
//! edges, where combatant records are validated before insertion and where
//! roster data is looked up. Those errors share the classification below.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: retrying with different input may succeed
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected inconsistency, indicates a bug
/// - **Fatal**: the encounter cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with alternative input.
    ///
    /// Examples: unknown monster id requested from the bestiary
    Recoverable,

    /// Validation error - malformed record, should not retry without changes.
    ///
    /// Examples: armor class 0, empty name
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - encounter state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all encounter-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EncounterError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_and_fatal_are_internal() {
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
