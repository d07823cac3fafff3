//! Common error infrastructure for statcalc-core.
//!
//! Each concern has its own error enum ([`OracleError`] for missing
//! definitions, [`ResolveError`] for unrecognized input records) and the
//! pipeline surfaces them through [`CalcError`], which adds the crew
//! validation failures and the ship diagnostic wrapper.
//!
//! Every failure is synchronous and fatal to the single call: no retry, no
//! partial result.

use crate::env::OracleError;
use crate::unit::ResolveError;

/// Severity level of an error, used for categorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input; the same call will fail again until the input or the
    /// game data changes.
    ///
    /// Examples: unknown unit id, crew not matching the ship's roster
    Validation,

    /// Inconsistent game data that should have been rejected at load time.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all statcalc-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by cause, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors produced by the stat and power pipeline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// The input record has no recognized shape.
    #[error(transparent)]
    Shape(#[from] ResolveError),

    /// Ship crew has the wrong number of members.
    #[error("incorrect number of crew members for ship '{ship}': expected {expected}, got {actual}")]
    CrewCount {
        ship: String,
        expected: usize,
        actual: usize,
    },

    /// A crew member is not part of the ship's declared roster, or a
    /// declared member is missing and cannot be synthesized.
    #[error("crew of ship '{ship}' does not match its roster at unit '{unit}'")]
    CrewMembership { ship: String, unit: String },

    /// A required static-table entry is missing.
    #[error(transparent)]
    MissingDefinition(#[from] OracleError),

    /// A ship computation failed; carries the ship id and an input dump.
    #[error("error on ship '{ship}': {source}")]
    Ship {
        ship: String,
        input: String,
        #[source]
        source: Box<CalcError>,
    },
}

impl CalcError {
    /// Strips the ship diagnostic wrapper(s).
    pub fn root_cause(&self) -> &CalcError {
        match self {
            CalcError::Ship { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_crew_mismatch(&self) -> bool {
        matches!(
            self.root_cause(),
            CalcError::CrewCount { .. } | CalcError::CrewMembership { .. }
        )
    }
}

impl GameError for CalcError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CalcError::Shape(err) => err.severity(),
            CalcError::MissingDefinition(err) => err.severity(),
            CalcError::CrewCount { .. } | CalcError::CrewMembership { .. } => {
                ErrorSeverity::Validation
            }
            CalcError::Ship { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CalcError::Shape(err) => err.error_code(),
            CalcError::MissingDefinition(err) => err.error_code(),
            CalcError::CrewCount { .. } => "CALC_CREW_COUNT_MISMATCH",
            CalcError::CrewMembership { .. } => "CALC_CREW_MEMBERSHIP_MISMATCH",
            CalcError::Ship { source, .. } => source.error_code(),
        }
    }
}
