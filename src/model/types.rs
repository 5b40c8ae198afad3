//! Core identifier types for weft.
//!
//! Foundation types used throughout the crate: fragment identities, entry
//! (chunk-group) names, and output-target names. All of them validate on
//! construction so that malformed input from the upstream dependency graph
//! surfaces as a typed error instead of corrupting resolution or fingerprint
//! stability downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FragmentId
// ---------------------------------------------------------------------------

/// Stable identity of one style fragment.
///
/// A fragment is identified by the `request` that produced it (a path-like
/// string, possibly carrying a loader chain and a query suffix) plus an
/// `occurrence` index that distinguishes repeated emissions of the same
/// request within one build pass. Identity is compared by value; the request
/// string is never re-parsed or re-concatenated after construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFragmentId")]
pub struct FragmentId {
    request: String,
    occurrence: u32,
}

/// Unvalidated wire form of [`FragmentId`].
#[derive(Deserialize)]
struct RawFragmentId {
    request: String,
    #[serde(default)]
    occurrence: u32,
}

impl FragmentId {
    /// Create a new `FragmentId` from a request string and occurrence index.
    ///
    /// # Errors
    /// Returns an error if the request is empty. The core never fabricates
    /// identity for anonymous fragments.
    pub fn new(request: &str, occurrence: u32) -> Result<Self, ValidationError> {
        Self::validate(request)?;
        Ok(Self {
            request: request.to_owned(),
            occurrence,
        })
    }

    /// The request string this fragment was produced from.
    #[must_use]
    pub fn request(&self) -> &str {
        &self.request
    }

    /// The occurrence index distinguishing repeated emissions of one request.
    #[must_use]
    pub const fn occurrence(&self) -> u32 {
        self.occurrence
    }

    /// The trailing resource of the request: loader-chain prefix (`…!`) and
    /// query suffix (`?…`) stripped.
    #[must_use]
    pub fn resource_path(&self) -> &str {
        let resource = self
            .request
            .rsplit('!')
            .next()
            .unwrap_or(self.request.as_str());
        match resource.find('?') {
            Some(at) => &resource[..at],
            None => resource,
        }
    }

    fn validate(request: &str) -> Result<(), ValidationError> {
        if request.is_empty() {
            return Err(ValidationError {
                kind: ErrorKind::FragmentId,
                value: request.to_owned(),
                reason: "fragment request must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "css {}", self.request)?;
        if self.occurrence > 0 {
            write!(f, " ({})", self.occurrence)?;
        }
        Ok(())
    }
}

impl TryFrom<RawFragmentId> for FragmentId {
    type Error = ValidationError;
    fn try_from(raw: RawFragmentId) -> Result<Self, Self::Error> {
        Self::validate(&raw.request)?;
        Ok(Self {
            request: raw.request,
            occurrence: raw.occurrence,
        })
    }
}

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// A validated entry (chunk-group) name.
///
/// Each entry point into the dependency graph observes its own traversal
/// order over the fragments it references; the name labels that ordering in
/// diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Create a new `EntryId`, validating that the name is non-empty.
    ///
    /// # Errors
    /// Returns an error if the name is empty.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::validate(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Return the entry name as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() {
            return Err(ValidationError {
                kind: ErrorKind::EntryId,
                value: s.to_owned(),
                reason: "entry name must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntryId {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryId {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// TargetId
// ---------------------------------------------------------------------------

/// A validated output-target name.
///
/// One target corresponds to one emitted artifact (one resolved order, one
/// rendered stream, one content fingerprint).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetId(String);

impl TargetId {
    /// Create a new `TargetId`, validating that the name is non-empty.
    ///
    /// # Errors
    /// Returns an error if the name is empty.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::validate(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Return the target name as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() {
            return Err(ValidationError {
                kind: ErrorKind::TargetId,
                value: s.to_owned(),
                reason: "target name must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TargetId {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TargetId {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl From<TargetId> for String {
    fn from(id: TargetId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// What kind of value failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A fragment identity.
    FragmentId,
    /// An entry (chunk-group) name.
    EntryId,
    /// An output-target name.
    TargetId,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FragmentId => write!(f, "fragment id"),
            Self::EntryId => write!(f, "entry name"),
            Self::TargetId => write!(f, "target name"),
        }
    }
}

/// A value failed validation at a type boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// What kind of value was being validated.
    pub kind: ErrorKind,
    /// The invalid value.
    pub value: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?} ({})", self.kind, self.value, self.reason)
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
