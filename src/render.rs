//! Rendering of a resolved fragment order into one output stream.
//!
//! Concatenation is the only transformation performed: no minification, no
//! selector rewriting. Two streams are produced and joined:
//!
//! - **External imports**: fragments whose content begins with
//!   `@import url` are hoisted, in resolved order, ahead of all other
//!   content. Downstream consumers only honor import directives that precede
//!   other rules. A media scope on an import is spliced into the directive's
//!   trailing clause; import directives cannot be wrapped in a block.
//! - **Normal fragments**: emitted in resolved order, wrapped in
//!   `@media <condition> { … }` when scoped, bare otherwise, each followed
//!   by a newline separator.
//!
//! Each normal fragment is also recorded as a [`SourceUnit`] carrying its
//! display name, byte range in the concatenated output, and source map (if
//! any), so the asset-emission collaborator can materialize a combined
//! source map without this crate interpreting map contents.

use serde::Serialize;

use crate::model::fragment::{Fragment, SourceMap};

// ---------------------------------------------------------------------------
// SourceUnit
// ---------------------------------------------------------------------------

/// One fragment's contribution to the rendered output.
///
/// `offset`/`len` locate the fragment body (exclusive of any media wrapper
/// or separator) within [`RenderedTarget::content`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceUnit {
    /// Human-readable unit name, used for source-map naming.
    pub name: String,
    /// Byte offset of the fragment body in the concatenated output.
    pub offset: usize,
    /// Byte length of the fragment body.
    pub len: usize,
    /// The fragment's source map, if it carried one.
    pub source_map: Option<SourceMap>,
}

// ---------------------------------------------------------------------------
// RenderedTarget
// ---------------------------------------------------------------------------

/// The rendered artifact for one output target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedTarget {
    /// External-import stream followed by the normal stream.
    pub content: String,
    /// Per-fragment source units for the normal stream, in emission order.
    pub units: Vec<SourceUnit>,
}

impl RenderedTarget {
    /// Returns `true` if nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Concatenate `order` into a [`RenderedTarget`].
///
/// `name_of` supplies the human-readable unit name per fragment; pass
/// [`Fragment::readable_name`] unless the embedder shortens requests.
pub fn render<F>(order: &[&Fragment], name_of: F) -> RenderedTarget
where
    F: Fn(&Fragment) -> String,
{
    // Imports are hoisted in a first pass so normal-unit byte offsets are
    // final when recorded.
    let mut content = String::new();
    for fragment in order.iter().filter(|f| f.is_external_import()) {
        match fragment.media() {
            Some(media) => content.push_str(&splice_import_media(fragment.content(), media)),
            None => content.push_str(fragment.content()),
        }
        content.push('\n');
    }

    let mut units = Vec::new();
    for fragment in order.iter().filter(|f| !f.is_external_import()) {
        if let Some(media) = fragment.media() {
            content.push_str("@media ");
            content.push_str(media);
            content.push_str(" {\n");
        }

        let offset = content.len();
        content.push_str(fragment.content());
        units.push(SourceUnit {
            name: name_of(fragment),
            offset,
            len: fragment.content().len(),
            source_map: fragment.source_map().cloned(),
        });
        content.push('\n');

        if fragment.media().is_some() {
            content.push_str("}\n");
        }
    }

    RenderedTarget { content, units }
}

/// Splice a media condition into an import directive's trailing clause.
///
/// The condition lands before the terminating `;`, or is appended (with a
/// `;`) when the directive has none. Import directives cannot be wrapped in
/// a media block.
fn splice_import_media(content: &str, media: &str) -> String {
    content.find(';').map_or_else(
        || format!("{} {media};", content.trim_end()),
        |at| format!("{} {media}{}", content[..at].trim_end(), &content[at..]),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
