//! Error types for tidy-sheets-core

use std::fmt;

use thiserror::Error;

use crate::table::Signature;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a positional lookup can fail to produce a dimension value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// No candidate dimension cell exists on the axis at all
    Missing,
    /// Candidates exist but none lies in the lookup direction
    Failed,
    /// More than one candidate claims the same position
    Ambiguous,
    /// The observation lies outside every range the engine defines
    OutOfRange,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupFailure::Missing => "missing",
            LookupFailure::Failed => "failed",
            LookupFailure::Ambiguous => "ambiguous",
            LookupFailure::OutOfRange => "out of range",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in tidy-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Two selections from different acquisitions were combined
    #[error("Selections come from different tables (signature {left} vs {right})")]
    StructuralMismatch { left: Signature, right: Signature },

    /// A requested position is absent from the grid or the current selection
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    /// A dimension value could not be resolved for an observation
    #[error("{kind} lookup: {message}")]
    Lookup {
        kind: LookupFailure,
        message: String,
    },

    /// Missing label, malformed direction or shift, bad resolver setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One message per cell rejected by a validator
    #[error("Validation failed for {} cell(s): {}", .0.len(), .0.join("; "))]
    Validation(Vec<String>),

    /// Malformed excel-style reference
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A cardinality or axis assertion on a selection did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A reader produced two cells at the same position
    #[error("Duplicate cell at {0}")]
    DuplicateCell(String),
}

impl Error {
    /// Create a lookup error of the given kind
    pub fn lookup<S: Into<String>>(kind: LookupFailure, message: S) -> Self {
        Error::Lookup {
            kind,
            message: message.into(),
        }
    }

    /// Create a configuration error with a message
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create an out-of-bounds error with a message
    pub fn out_of_bounds<S: Into<String>>(msg: S) -> Self {
        Error::OutOfBounds(msg.into())
    }

    /// The lookup failure kind, if this is a lookup error
    pub fn lookup_failure(&self) -> Option<LookupFailure> {
        match self {
            Error::Lookup { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
