//! Input-shape errors.

use crate::error::{ErrorSeverity, GameError};

/// Input record shapes understood by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RecordShape {
    /// Already-normalized record keyed by `defId`.
    Canonical,
    /// Raw player-profile record keyed by `definitionId`.
    Profile,
    /// List-API record, keyed externally by unit id.
    ListApi,
}

/// An input record could not be normalized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Neither `defId` nor `definitionId` is present.
    #[error("unrecognized unit record: expected a 'defId' or 'definitionId' field")]
    UnrecognizedShape,

    /// The record has a recognized id field but malformed contents.
    #[error("invalid {shape} record: {message}")]
    InvalidRecord { shape: RecordShape, message: String },

    /// `definitionId` does not start with a unit id.
    #[error("invalid definition id '{0}'")]
    InvalidDefinitionId(String),

    /// Raw mod `definitionId` does not encode set and pips.
    #[error("invalid mod definition id '{0}'")]
    InvalidModDefinition(String),
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::UnrecognizedShape => "RESOLVE_UNRECOGNIZED_SHAPE",
            ResolveError::InvalidRecord { .. } => "RESOLVE_INVALID_RECORD",
            ResolveError::InvalidDefinitionId(_) => "RESOLVE_INVALID_DEFINITION_ID",
            ResolveError::InvalidModDefinition(_) => "RESOLVE_INVALID_MOD_DEFINITION",
        }
    }
}
