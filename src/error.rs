//! Unified error type for weft extraction.
//!
//! Defines [`ExtractError`], the failure surface of the pipeline stage.
//! Ordering conflicts are deliberately absent: they are recoverable,
//! always-resolved conditions reported through
//! [`crate::diagnostics::Diagnostics`], never through this type. Only
//! malformed input aborts a target, and it aborts that target alone.

use std::fmt;

use crate::config::ConfigError;
use crate::model::types::{FragmentId, ValidationError};

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// Unified error type for one target's extraction.
///
/// Each variant is self-contained: the message says what was wrong with the
/// input and what the upstream collaborator must change. The core never
/// repairs malformed input silently, since fabricated or dropped fragments
/// would corrupt fingerprint stability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// An identifier failed validation (empty fragment request, empty entry
    /// or target name).
    Validation(ValidationError),

    /// The same fragment identity appeared twice in one target's set.
    DuplicateFragment {
        /// The identity that was supplied more than once.
        id: FragmentId,
    },

    /// The extraction config file could not be loaded or parsed.
    Config(ConfigError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => {
                write!(
                    f,
                    "{err}\n  The dependency graph must supply validated names; this target was not processed."
                )
            }
            Self::DuplicateFragment { id } => {
                write!(
                    f,
                    "fragment '{id}' appears more than once in the target's fragment set.\n  The dependency graph must emit one fragment per (request, occurrence) pair; bump the occurrence index for repeated emissions of one request."
                )
            }
            Self::Config(err) => {
                write!(
                    f,
                    "{err}\n  Edit the config file and correct the issue."
                )
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::DuplicateFragment { .. } => None,
        }
    }
}

impl From<ValidationError> for ExtractError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigError> for ExtractError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
