//! Greedy linearization of per-entry orderings into one total order.
//!
//! Every entry that references a fragment subset supplies its own traversal
//! order. This module merges those partial orders into a single permutation
//! of the fragment set, honoring as many per-entry constraints as possible
//! and falling back deterministically when entries genuinely disagree.
//!
//! # Algorithm
//!
//! Each entry's members are kept as a pending stack sorted by position
//! descending, so the top of the stack is the entry's first unplaced
//! fragment. Every fragment also carries its cross-entry predecessor set:
//! all fragments that appeared before it in at least one entry's order.
//!
//! The main loop scans entries in input order. Each entry's top fragment is
//! a candidate; the first candidate whose predecessors are all placed is
//! emitted and the scan restarts. When no candidate qualifies, the orderings
//! contradict each other: the candidate with the fewest unsatisfied
//! predecessors is emitted anyway (the first entry scanned wins ties) and a
//! [`ConflictRecord`] is kept for diagnostics. Fragments referenced by no
//! entry are appended last, in declaration order.
//!
//! The loop places exactly one fragment per iteration, so it terminates in
//! at most `n` iterations with `O(n·m)` candidate work each.
//!
//! # Determinism
//!
//! Output depends only on fragment declaration order, entry input order, and
//! the per-entry positions. Entries are scanned in input order, predecessor
//! sets iterate in declaration order (`BTreeSet` over dense slots), and no
//! hash-map iteration reaches the output.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::model::fragment::Fragment;
use crate::model::ordering::{EntryOrdering, OrderingInput};
use crate::model::types::FragmentId;

use super::conflict::ConflictRecord;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Output of order resolution: a permutation of the input fragment set plus
/// every conflict encountered while producing it.
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    /// The resolved total order. Contains each input fragment exactly once.
    pub order: Vec<&'a Fragment>,
    /// All fallback placements, in the order they were made.
    pub conflicts: Vec<ConflictRecord>,
}

impl Resolution<'_> {
    /// Returns `true` if every per-entry constraint was honored.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

/// Merge per-entry orderings over `fragments` into one total order.
///
/// `fragments` declaration order is the pinned tie-break order; see the
/// module docs for the determinism contract. Resolution always succeeds and
/// always yields a full permutation, even under contradictory constraints.
#[must_use]
pub fn resolve<'a>(fragments: &'a [Fragment], orderings: &OrderingInput) -> Resolution<'a> {
    let resolution = match orderings {
        OrderingInput::PerEntry(entries) => resolve_per_entry(fragments, entries),
        OrderingInput::Flat(indices) => resolve_flat(fragments, indices),
    };
    tracing::debug!(
        "resolved {} fragments ({} ordering conflicts)",
        resolution.order.len(),
        resolution.conflicts.len()
    );
    resolution
}

/// Degraded path: order solely by a single pre-existing index per fragment.
///
/// No conflict detection is attempted. Fragments without an index sort
/// before indexed ones; the sort is stable, so declaration order breaks all
/// ties.
fn resolve_flat<'a>(fragments: &'a [Fragment], indices: &[(FragmentId, u32)]) -> Resolution<'a> {
    let index_of: HashMap<_, u32> = indices.iter().map(|(id, idx)| (id, *idx)).collect();
    let mut order: Vec<&Fragment> = fragments.iter().collect();
    order.sort_by_key(|f| index_of.get(f.id()).copied());
    Resolution {
        order,
        conflicts: Vec::new(),
    }
}

/// The best fallback candidate seen in one scan: the queue it sits on top
/// of, its dense slot, and its currently unsatisfied predecessors.
struct Fallback {
    queue: usize,
    slot: usize,
    unmet: Vec<usize>,
}

fn resolve_per_entry<'a>(fragments: &'a [Fragment], entries: &[EntryOrdering]) -> Resolution<'a> {
    let n = fragments.len();

    // Pending stack per entry: members sorted by position descending, so the
    // stack top (last element) is the entry's first unplaced fragment. The
    // stable sort keeps declaration order for equal positions.
    let mut queues: Vec<Vec<usize>> = entries
        .iter()
        .map(|entry| {
            let mut members: Vec<(u32, usize)> = fragments
                .iter()
                .enumerate()
                .filter_map(|(slot, f)| entry.position_of(f.id()).map(|pos| (pos, slot)))
                .collect();
            members.sort_by_key(|&(pos, _)| Reverse(pos));
            members.into_iter().map(|(_, slot)| slot).collect()
        })
        .collect();

    // Cross-entry predecessor sets: walking each stack top-down is walking
    // the entry front-to-back, so everything deeper in the stack than a
    // fragment precedes it in that entry's order.
    let mut predecessors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for queue in &queues {
        for (i, &later) in queue.iter().enumerate() {
            for &earlier in &queue[i + 1..] {
                predecessors[later].insert(earlier);
            }
        }
    }

    let mut placed = vec![false; n];
    let mut order_slots: Vec<usize> = Vec::with_capacity(n);
    let mut conflicts: Vec<ConflictRecord> = Vec::new();

    loop {
        let mut fallback: Option<Fallback> = None;
        let mut progressed = false;

        for (qi, queue) in queues.iter_mut().enumerate() {
            while queue.last().is_some_and(|&slot| placed[slot]) {
                queue.pop();
            }
            let Some(&slot) = queue.last() else { continue };

            let unmet: Vec<usize> = predecessors[slot]
                .iter()
                .copied()
                .filter(|&p| !placed[p])
                .collect();

            if unmet.is_empty() {
                queue.pop();
                placed[slot] = true;
                order_slots.push(slot);
                progressed = true;
                break;
            }

            // Strictly-fewer comparison: the first entry scanned wins ties.
            if fallback.as_ref().is_none_or(|b| unmet.len() < b.unmet.len()) {
                fallback = Some(Fallback {
                    queue: qi,
                    slot,
                    unmet,
                });
            }
        }

        if progressed {
            continue;
        }

        match fallback {
            Some(best) => {
                // Genuine conflict: no candidate has every required
                // predecessor placed. Place the least-constrained candidate
                // and record what could not be honored.
                queues[best.queue].pop();
                placed[best.slot] = true;
                order_slots.push(best.slot);
                conflicts.push(ConflictRecord {
                    fragment: fragments[best.slot].id().clone(),
                    unmet: best
                        .unmet
                        .iter()
                        .map(|&p| fragments[p].id().clone())
                        .collect(),
                });
            }
            // Every queue drained.
            None => break,
        }
    }

    // Fragments referenced by no entry keep declaration order.
    for slot in 0..n {
        if !placed[slot] {
            order_slots.push(slot);
        }
    }

    Resolution {
        order: order_slots.iter().map(|&slot| &fragments[slot]).collect(),
        conflicts,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
