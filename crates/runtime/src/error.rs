//! Error types surfaced by the runtime API.
//!
//! Wraps validation, oracle and repository failures so frontends can report
//! them with a single type.
use encounter_core::{CombatantId, EncounterError, ErrorSeverity, OracleError, ValidationError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("combatant {0} is not in the encounter")]
    CombatantNotFound(CombatantId),

    #[error("encounter session lock was poisoned")]
    LockPoisoned,
}

impl EncounterError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::CombatantNotFound(_) => ErrorSeverity::Recoverable,
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::CombatantNotFound(_) => "RUNTIME_COMBATANT_NOT_FOUND",
            Self::LockPoisoned => "RUNTIME_LOCK_POISONED",
        }
    }
}
