//! The per-target extraction stage.
//!
//! This is the explicit pipeline entry point the build orchestrator invokes
//! once the upstream dependency graph has finalized a target: typed input
//! (fragment set + orderings) in, typed output (resolved order, rendered
//! content, fingerprint, diagnostics) out. There is no hook registration and
//! no event subscription; embedders call [`run_extract_phase`] directly.
//!
//! # Pipeline
//!
//! 1. **Validate** — duplicate fragment identities are a hard failure for
//!    this target (and this target only); fabricating or dropping fragments
//!    would corrupt fingerprint stability.
//! 2. **Resolve** — merge per-entry orderings into one total order
//!    ([`crate::resolve`]).
//! 3. **Report** — convert conflict records into warnings unless
//!    `ignore_order` is configured. Suppression never changes placement.
//! 4. **Render + fingerprint** — both consume the resolved set; the
//!    fingerprint hashes fragment data, not the rendered string.
//!
//! The stage is pure and synchronous. Independent targets share no mutable
//! state and may run fully in parallel; merge their [`Diagnostics`] buffers
//! afterward.

use std::collections::HashSet;

use crate::config::ExtractConfig;
use crate::diagnostics::{ConflictWarning, Diagnostics};
use crate::error::ExtractError;
use crate::fingerprint::{ContentHash, Fingerprinter};
use crate::model::fragment::Fragment;
use crate::model::ordering::OrderingInput;
use crate::model::types::TargetId;
use crate::render::{RenderedTarget, render};
use crate::resolve::{ConflictRecord, resolve};

// ---------------------------------------------------------------------------
// TargetInput
// ---------------------------------------------------------------------------

/// Everything the dependency extractor supplies for one output target.
///
/// Fragment declaration order is authoritative: it is the pinned iteration
/// order for tie-breaks and fingerprinting. Entry order inside `orderings`
/// is equally authoritative for fallback tie-breaks.
#[derive(Clone, Debug)]
pub struct TargetInput {
    /// The output target these fragments belong to.
    pub target: TargetId,
    /// The target's fragment set, in declaration order.
    pub fragments: Vec<Fragment>,
    /// Per-entry orderings, or the degraded flat index.
    pub orderings: OrderingInput,
}

// ---------------------------------------------------------------------------
// TargetOutput
// ---------------------------------------------------------------------------

/// Output of a successful extraction stage for one target.
#[derive(Clone, Debug)]
pub struct TargetOutput<'a> {
    /// The resolved total order over the target's fragments.
    pub order: Vec<&'a Fragment>,
    /// Rendered content and source units, for asset emission.
    pub rendered: RenderedTarget,
    /// Content fingerprint for filename templating. `None` for an empty
    /// target, whose asset emission the collaborator skips entirely.
    pub hash: Option<ContentHash>,
    /// Raw conflict records, regardless of warning suppression.
    pub conflicts: Vec<ConflictRecord>,
    /// Conflict warnings for build diagnostics (empty when suppressed).
    pub diagnostics: Diagnostics,
}

// ---------------------------------------------------------------------------
// run_extract_phase
// ---------------------------------------------------------------------------

/// Run the extraction stage for one output target.
///
/// # Errors
/// Returns [`ExtractError::DuplicateFragment`] if the same fragment identity
/// appears twice in the input set. Ordering conflicts are not errors; they
/// surface through [`TargetOutput::diagnostics`].
pub fn run_extract_phase<'a>(
    input: &'a TargetInput,
    config: &ExtractConfig,
) -> Result<TargetOutput<'a>, ExtractError> {
    let mut seen = HashSet::with_capacity(input.fragments.len());
    for fragment in &input.fragments {
        if !seen.insert(fragment.id()) {
            return Err(ExtractError::DuplicateFragment {
                id: fragment.id().clone(),
            });
        }
    }

    if input.fragments.is_empty() {
        return Ok(TargetOutput {
            order: Vec::new(),
            rendered: RenderedTarget::default(),
            hash: None,
            conflicts: Vec::new(),
            diagnostics: Diagnostics::new(),
        });
    }

    let resolution = resolve(&input.fragments, &input.orderings);

    let mut diagnostics = Diagnostics::new();
    if !config.ordering.ignore_order {
        for record in &resolution.conflicts {
            let warning = ConflictWarning::from_record(&input.target, record);
            tracing::warn!("{warning}");
            diagnostics.push(warning);
        }
    }

    let rendered = render(&resolution.order, Fragment::readable_name);
    let fingerprinter = Fingerprinter::new(
        config.fingerprint.function,
        config.fingerprint.digest_length,
    );
    let hash = fingerprinter.fingerprint(&input.fragments);

    Ok(TargetOutput {
        order: resolution.order,
        rendered,
        hash: Some(hash),
        conflicts: resolution.conflicts,
        diagnostics,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;
    use crate::model::ordering::EntryOrdering;
    use crate::model::types::{EntryId, FragmentId};

    fn fid(request: &str) -> FragmentId {
        FragmentId::new(request, 0).unwrap()
    }

    fn frag(request: &str, content: &str) -> Fragment {
        Fragment::new(fid(request), content.to_owned(), None, None)
    }

    fn entry(name: &str, order: &[&str]) -> EntryOrdering {
        EntryOrdering::new(
            EntryId::new(name).unwrap(),
            order
                .iter()
                .enumerate()
                .map(|(i, request)| (fid(request), i as u32)),
        )
    }

    fn input(fragments: Vec<Fragment>, entries: Vec<EntryOrdering>) -> TargetInput {
        TargetInput {
            target: TargetId::new("app").unwrap(),
            fragments,
            orderings: OrderingInput::PerEntry(entries),
        }
    }

    #[test]
    fn clean_target_produces_content_and_hash() {
        let target = input(
            vec![frag("./a.css", "a{}"), frag("./b.css", "b{}")],
            vec![entry("main", &["./a.css", "./b.css"])],
        );
        let output = run_extract_phase(&target, &ExtractConfig::default()).unwrap();
        assert_eq!(output.rendered.content, "a{}\nb{}\n");
        assert!(output.hash.is_some());
        assert!(output.conflicts.is_empty());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn empty_target_short_circuits() {
        let target = input(Vec::new(), Vec::new());
        let output = run_extract_phase(&target, &ExtractConfig::default()).unwrap();
        assert!(output.order.is_empty());
        assert!(output.rendered.is_empty());
        assert!(output.hash.is_none());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn duplicate_identity_aborts_target() {
        let target = input(
            vec![frag("./a.css", "a{}"), frag("./a.css", "a{color:red}")],
            Vec::new(),
        );
        let err = run_extract_phase(&target, &ExtractConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ExtractError::DuplicateFragment { id: fid("./a.css") }
        );
    }

    #[test]
    fn distinct_occurrences_of_one_request_are_legal() {
        let target = input(
            vec![
                Fragment::new(
                    FragmentId::new("./a.css", 0).unwrap(),
                    "a{}".to_owned(),
                    None,
                    None,
                ),
                Fragment::new(
                    FragmentId::new("./a.css", 1).unwrap(),
                    "a{color:red}".to_owned(),
                    None,
                    None,
                ),
            ],
            Vec::new(),
        );
        assert!(run_extract_phase(&target, &ExtractConfig::default()).is_ok());
    }

    #[test]
    fn conflicts_surface_as_warnings() {
        let target = input(
            vec![frag("./a.css", "a{}"), frag("./b.css", "b{}")],
            vec![
                entry("main", &["./a.css", "./b.css"]),
                entry("admin", &["./b.css", "./a.css"]),
            ],
        );
        let output = run_extract_phase(&target, &ExtractConfig::default()).unwrap();
        assert_eq!(output.conflicts.len(), 1);
        assert_eq!(output.diagnostics.len(), 1);
        let warning = &output.diagnostics.warnings()[0];
        assert_eq!(warning.target.as_str(), "app");
    }

    #[test]
    fn ignore_order_suppresses_warnings_not_placement() {
        let fragments = vec![frag("./a.css", "a{}"), frag("./b.css", "b{}")];
        let entries = vec![
            entry("main", &["./a.css", "./b.css"]),
            entry("admin", &["./b.css", "./a.css"]),
        ];

        let loud_input = input(fragments.clone(), entries.clone());
        let loud = run_extract_phase(&loud_input, &ExtractConfig::default()).unwrap();

        let mut quiet_config = ExtractConfig::default();
        quiet_config.ordering.ignore_order = true;
        let quiet_input = input(fragments, entries);
        let quiet = run_extract_phase(&quiet_input, &quiet_config).unwrap();

        assert!(quiet.diagnostics.is_empty());
        assert_eq!(quiet.conflicts, loud.conflicts);
        assert_eq!(quiet.rendered.content, loud.rendered.content);
    }

    #[test]
    fn hash_ignores_resolved_order() {
        // Same declaration order, different entry orderings: the resolved
        // order differs, the fingerprint must not.
        let fragments = vec![frag("./a.css", "a{}"), frag("./b.css", "b{}")];
        let forward = input(
            fragments.clone(),
            vec![entry("main", &["./a.css", "./b.css"])],
        );
        let backward = input(fragments, vec![entry("main", &["./b.css", "./a.css"])]);

        let a = run_extract_phase(&forward, &ExtractConfig::default()).unwrap();
        let b = run_extract_phase(&backward, &ExtractConfig::default()).unwrap();
        assert_ne!(a.rendered.content, b.rendered.content);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn digest_length_config_reaches_fingerprinter() {
        let mut config = ExtractConfig::default();
        config.fingerprint.digest_length = 8;
        let target = input(vec![frag("./a.css", "a{}")], Vec::new());
        let output = run_extract_phase(&target, &config).unwrap();
        assert_eq!(output.hash.unwrap().as_str().len(), 8);
    }
}
