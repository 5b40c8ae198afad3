//! weft extraction configuration (`weft.toml`).
//!
//! Defines the typed configuration consumed by the pipeline stage: ordering
//! diagnostics suppression and fingerprint parameters. The embedding build
//! orchestrator decides where the file lives and when to load it; this
//! module only defines the schema and parsing.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::fingerprint::{DEFAULT_DIGEST_LENGTH, HashFunction};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level extraction configuration.
///
/// Parsed from TOML. Missing fields use sensible defaults. Missing file
/// means all defaults (no error).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct ExtractConfig {
    /// Ordering-diagnostics settings.
    #[serde(default)]
    pub ordering: OrderingConfig,

    /// Content-fingerprint settings.
    #[serde(default)]
    pub fingerprint: FingerprintConfig,
}

// ---------------------------------------------------------------------------
// OrderingConfig
// ---------------------------------------------------------------------------

/// Ordering-diagnostics settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingConfig {
    /// Suppress conflict warnings (default: `false`).
    ///
    /// Suppression affects reporting only: the resolver still performs the
    /// same deterministic fallback placements.
    #[serde(default)]
    pub ignore_order: bool,
}

// ---------------------------------------------------------------------------
// FingerprintConfig
// ---------------------------------------------------------------------------

/// Content-fingerprint settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FingerprintConfig {
    /// Digest algorithm (default: `"sha256"`).
    #[serde(default)]
    pub function: HashFunction,

    /// Truncation length of the hex digest (default: 20). Lengths beyond
    /// the digest's full hex width are clamped.
    #[serde(default = "default_digest_length")]
    pub digest_length: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            function: HashFunction::default(),
            digest_length: default_digest_length(),
        }
    }
}

const fn default_digest_length() -> usize {
    DEFAULT_DIGEST_LENGTH
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error loading or parsing an extraction config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<std::path::PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl ExtractConfig {
    /// Load configuration from a TOML file.
    ///
    /// - If the file does not exist, returns all defaults (not an error).
    /// - If the file exists but contains invalid TOML or unknown fields,
    ///   returns a [`ConfigError`] with line-level detail.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse
    /// errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                // Calculate line number from byte offset.
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
