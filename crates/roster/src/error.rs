//! Errors surfaced by roster processing.

use statcalc_core::{CalcError, ErrorSeverity, GameError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("game data has not been loaded")]
    DataNotLoaded,

    #[error("game data lock was poisoned")]
    LockPoisoned,

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RosterError::InvalidRoster(_) => ErrorSeverity::Validation,
            RosterError::Calc(err) => err.severity(),
            RosterError::DataNotLoaded | RosterError::LockPoisoned | RosterError::Json(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::DataNotLoaded => "ROSTER_DATA_NOT_LOADED",
            RosterError::LockPoisoned => "ROSTER_LOCK_POISONED",
            RosterError::InvalidRoster(_) => "ROSTER_INVALID",
            RosterError::Calc(err) => err.error_code(),
            RosterError::Json(_) => "ROSTER_JSON",
        }
    }
}
