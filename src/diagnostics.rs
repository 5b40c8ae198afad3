//! Conflict-warning diagnostics.
//!
//! Conflicts are collected, never thrown: a single resolution pass surfaces
//! every disagreement it found. Each warning is structured (target name,
//! fallback fragment, unmet predecessors) and renders to the human-readable
//! multi-line message build tools print.
//!
//! Buffers are per-target and append-only, so independent targets can
//! resolve in parallel and [`Diagnostics::merge`] their buffers afterward
//! without interleaving corruption.

use std::fmt;

use serde::Serialize;

use crate::model::types::TargetId;
use crate::resolve::ConflictRecord;

// ---------------------------------------------------------------------------
// ConflictWarning
// ---------------------------------------------------------------------------

/// One conflict surfaced to build diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictWarning {
    /// The output target whose resolution hit the conflict.
    pub target: TargetId,
    /// Readable name of the fragment placed out of order.
    pub fragment: String,
    /// Readable names of the fragments whose required precedence could not
    /// be honored.
    pub unmet: Vec<String>,
}

impl ConflictWarning {
    /// Build a warning from a resolver conflict record.
    #[must_use]
    pub fn from_record(target: &TargetId, record: &ConflictRecord) -> Self {
        Self {
            target: target.clone(),
            fragment: record.fragment.to_string(),
            unmet: record.unmet.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for ConflictWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target {}\nConflicting order between:\n * {}",
            self.target, self.fragment
        )?;
        for name in &self.unmet {
            write!(f, "\n * {name}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Append-only warning buffer for one target's resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    warnings: Vec<ConflictWarning>,
}

impl Diagnostics {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Append one warning.
    pub fn push(&mut self, warning: ConflictWarning) {
        self.warnings.push(warning);
    }

    /// All warnings collected so far, in emission order.
    #[must_use]
    pub fn warnings(&self) -> &[ConflictWarning] {
        &self.warnings
    }

    /// Whether any warnings were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Fold another target's buffer into this one, preserving both emission
    /// orders.
    pub fn merge(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
