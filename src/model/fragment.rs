//! The style-fragment data model.
//!
//! A [`Fragment`] is one unit of style content as emitted by the upstream
//! dependency graph: an opaque text body, an optional media scope, and an
//! optional source map, under a stable [`FragmentId`]. The core never parses
//! or validates the body; any string is accepted.
//!
//! Fragments are created once per build pass and may be refreshed in place on
//! incremental rebuilds ([`Fragment::refresh`]): content, media, and source
//! map are replaced while identity stays stable, matching build systems that
//! reuse a module object across passes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::types::FragmentId;

/// Content prefix marking an external-stylesheet-import directive.
///
/// Import directives are only honored by downstream consumers when they
/// precede all other rules, so the renderer hoists matching fragments into a
/// separate stream.
pub const EXTERNAL_IMPORT_PREFIX: &str = "@import url";

// ---------------------------------------------------------------------------
// SourceMap
// ---------------------------------------------------------------------------

/// Opaque source-map payload attached to a fragment.
///
/// The core never interprets the map. It is carried into rendered source
/// units unchanged, and its compact JSON serialization contributes to the
/// content fingerprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceMap(serde_json::Value);

impl SourceMap {
    /// Wrap a raw JSON payload.
    #[must_use]
    pub const fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Borrow the raw JSON payload.
    #[must_use]
    pub const fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON form, as fed to the fingerprinter.
    #[must_use]
    pub fn to_compact_json(&self) -> String {
        // Serializing a Value cannot fail: keys are always strings.
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_json())
    }
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// One style fragment: content, optional media scope, optional source map.
///
/// Content is immutable between [`Fragment::refresh`] calls. The fields are
/// private so identity can never drift from the data it was built with.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    id: FragmentId,
    content: String,
    media: Option<String>,
    source_map: Option<SourceMap>,
}

impl Fragment {
    /// Build a fragment from a raw dependency record.
    ///
    /// No validation is performed on the content; an empty `media` option
    /// means global scope.
    #[must_use]
    pub const fn new(
        id: FragmentId,
        content: String,
        media: Option<String>,
        source_map: Option<SourceMap>,
    ) -> Self {
        Self {
            id,
            content,
            media,
            source_map,
        }
    }

    /// The fragment's stable identity.
    #[must_use]
    pub const fn id(&self) -> &FragmentId {
        &self.id
    }

    /// The raw fragment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The media scope, if any. `None` means global scope.
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// The attached source map, if any.
    #[must_use]
    pub const fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// Content length in bytes.
    ///
    /// Used by external bundling heuristics; the resolver itself never looks
    /// at sizes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Whether this fragment is an external-stylesheet-import directive that
    /// must precede all other rendered content.
    #[must_use]
    pub fn is_external_import(&self) -> bool {
        self.content.starts_with(EXTERNAL_IMPORT_PREFIX)
    }

    /// Human-readable name for diagnostics and source-unit naming.
    #[must_use]
    pub fn readable_name(&self) -> String {
        self.id.to_string()
    }

    /// Replace content, media, and source map in place, preserving identity.
    ///
    /// Incremental rebuilds reuse fragment objects across passes; only the
    /// mutable payload is refreshed.
    pub fn refresh(
        &mut self,
        content: String,
        media: Option<String>,
        source_map: Option<SourceMap>,
    ) {
        self.content = content;
        self.media = media;
        self.source_map = source_map;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
