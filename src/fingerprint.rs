//! Content fingerprinting for cache-busting filenames.
//!
//! The fingerprint is computed over the fragment *set* for one output
//! target, not over the rendered string, so it can run independently of (and
//! concurrently with) rendering and short-circuit rendering entirely on a
//! cache hit upstream.
//!
//! Each fragment feeds three values into one incremental digest, in the
//! set's declaration order: content, media scope (or empty), and the compact
//! JSON form of its source map (or empty). The digest therefore changes iff
//! any contributing fragment's content/media/source-map changes or the set
//! itself changes.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::model::fragment::{Fragment, SourceMap};

/// Default truncation length of the hex digest, in characters.
pub const DEFAULT_DIGEST_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// HashFunction
// ---------------------------------------------------------------------------

/// Digest algorithm used for content fingerprints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    /// SHA-256 (default).
    #[default]
    Sha256,
    /// SHA-512, for embedders standardized on wider digests.
    Sha512,
}

// ---------------------------------------------------------------------------
// ContentHash
// ---------------------------------------------------------------------------

/// A truncated lowercase-hex content digest.
///
/// Consumed, together with the target's logical identifier, by the external
/// filename-templating collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Return the digest as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Fingerprinter
// ---------------------------------------------------------------------------

/// Computes truncated content digests over fragment sets.
#[derive(Clone, Copy, Debug)]
pub struct Fingerprinter {
    function: HashFunction,
    digest_length: usize,
}

impl Fingerprinter {
    /// Create a fingerprinter with an explicit function and truncation
    /// length. Lengths beyond the digest's full hex width are clamped.
    #[must_use]
    pub const fn new(function: HashFunction, digest_length: usize) -> Self {
        Self {
            function,
            digest_length,
        }
    }

    /// Fingerprint one target's fragment set, in declaration order.
    #[must_use]
    pub fn fingerprint(&self, fragments: &[Fragment]) -> ContentHash {
        let mut hex = match self.function {
            HashFunction::Sha256 => digest_hex::<Sha256>(fragments),
            HashFunction::Sha512 => digest_hex::<Sha512>(fragments),
        };
        hex.truncate(self.digest_length);
        ContentHash(hex)
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(HashFunction::default(), DEFAULT_DIGEST_LENGTH)
    }
}

/// Full lowercase-hex digest over the fragment set.
fn digest_hex<D: Digest>(fragments: &[Fragment]) -> String {
    let mut hasher = D::new();
    for fragment in fragments {
        hasher.update(fragment.content().as_bytes());
        hasher.update(fragment.media().unwrap_or("").as_bytes());
        hasher.update(
            fragment
                .source_map()
                .map_or_else(String::new, SourceMap::to_compact_json)
                .as_bytes(),
        );
    }
    let result = hasher.finalize();
    let mut hex = String::with_capacity(result.len() * 2);
    for b in &result {
        let _ = write!(hex, "{b:02x}");
    }
    hex
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
