//! Per-entry orderings: the dependency extractor's input contract.
//!
//! The upstream dependency graph observes, for each entry (chunk-group), a
//! total order over the subset of fragments that entry references. Positions
//! are comparable only within one entry; two entries may rank overlapping
//! subsets differently, which is exactly the conflict the resolver exists to
//! arbitrate.
//!
//! # Determinism
//!
//! The order of entries inside [`OrderingInput::PerEntry`] is authoritative:
//! the resolver scans entries in that order and breaks fallback ties in favor
//! of the first entry encountered. Callers must supply entries in a stable
//! order (e.g. declaration order), never an order derived from hash-map
//! iteration.

use std::collections::HashMap;

use crate::model::types::{EntryId, FragmentId};

// ---------------------------------------------------------------------------
// EntryOrdering
// ---------------------------------------------------------------------------

/// One entry's observed traversal order over the fragments it references.
///
/// Stores `(fragment, position)` pairs; position values need only be
/// comparable within this entry. If the same fragment is supplied twice, the
/// last pair wins.
#[derive(Clone, Debug)]
pub struct EntryOrdering {
    entry: EntryId,
    positions: HashMap<FragmentId, u32>,
}

impl EntryOrdering {
    /// Build an ordering for `entry` from `(fragment, position)` pairs.
    #[must_use]
    pub fn new(entry: EntryId, pairs: impl IntoIterator<Item = (FragmentId, u32)>) -> Self {
        Self {
            entry,
            positions: pairs.into_iter().collect(),
        }
    }

    /// The entry this ordering belongs to.
    #[must_use]
    pub const fn entry(&self) -> &EntryId {
        &self.entry
    }

    /// The position of `id` within this entry, or `None` if the entry does
    /// not reference the fragment.
    #[must_use]
    pub fn position_of(&self, id: &FragmentId) -> Option<u32> {
        self.positions.get(id).copied()
    }

    /// Number of fragments this entry references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether this entry references no fragments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// OrderingInput
// ---------------------------------------------------------------------------

/// Ordering information supplied by the dependency extractor.
///
/// The capability split is explicit rather than probed at runtime: a graph
/// that can report per-entry positions supplies [`OrderingInput::PerEntry`];
/// a legacy/degraded graph supplies one flat index per fragment via
/// [`OrderingInput::Flat`], which sorts without conflict detection.
#[derive(Clone, Debug)]
pub enum OrderingInput {
    /// Full mode: one ordering per entry, merged by the resolver.
    PerEntry(Vec<EntryOrdering>),
    /// Degraded mode: a single pre-existing relative index per fragment.
    Flat(Vec<(FragmentId, u32)>),
}

impl OrderingInput {
    /// Whether this input is the degraded single-index form.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    /// Number of entry orderings (zero in degraded mode).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        match self {
            Self::PerEntry(entries) => entries.len(),
            Self::Flat(_) => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;

    fn fid(request: &str) -> FragmentId {
        FragmentId::new(request, 0).unwrap()
    }

    fn entry(name: &str) -> EntryId {
        EntryId::new(name).unwrap()
    }

    #[test]
    fn position_of_present_fragment() {
        let ord = EntryOrdering::new(entry("main"), vec![(fid("./a.css"), 0), (fid("./b.css"), 1)]);
        assert_eq!(ord.position_of(&fid("./a.css")), Some(0));
        assert_eq!(ord.position_of(&fid("./b.css")), Some(1));
    }

    #[test]
    fn position_of_absent_fragment() {
        let ord = EntryOrdering::new(entry("main"), vec![(fid("./a.css"), 0)]);
        assert_eq!(ord.position_of(&fid("./zzz.css")), None);
    }

    #[test]
    fn duplicate_pair_last_wins() {
        let ord = EntryOrdering::new(entry("main"), vec![(fid("./a.css"), 0), (fid("./a.css"), 7)]);
        assert_eq!(ord.position_of(&fid("./a.css")), Some(7));
        assert_eq!(ord.len(), 1);
    }

    #[test]
    fn empty_ordering() {
        let ord = EntryOrdering::new(entry("main"), Vec::new());
        assert!(ord.is_empty());
        assert_eq!(ord.len(), 0);
    }

    #[test]
    fn ordering_input_capability() {
        let per_entry = OrderingInput::PerEntry(vec![EntryOrdering::new(
            entry("main"),
            vec![(fid("./a.css"), 0)],
        )]);
        assert!(!per_entry.is_degraded());
        assert_eq!(per_entry.entry_count(), 1);

        let flat = OrderingInput::Flat(vec![(fid("./a.css"), 0)]);
        assert!(flat.is_degraded());
        assert_eq!(flat.entry_count(), 0);
    }
}
