//! Shared fixtures for weft integration tests.
#![allow(dead_code)]
//!
//! Builders for fragments, entry orderings, and target inputs so scenario
//! tests read as close to the prose they verify as possible.

use weft::model::fragment::{Fragment, SourceMap};
use weft::model::ordering::{EntryOrdering, OrderingInput};
use weft::model::types::{EntryId, FragmentId, TargetId};
use weft::pipeline::TargetInput;

/// Fragment id at occurrence 0.
pub fn fid(request: &str) -> FragmentId {
    FragmentId::new(request, 0).expect("valid request")
}

/// Bare fragment: no media, no source map.
pub fn frag(request: &str, content: &str) -> Fragment {
    Fragment::new(fid(request), content.to_owned(), None, None)
}

/// Media-scoped fragment.
pub fn frag_media(request: &str, content: &str, media: &str) -> Fragment {
    Fragment::new(
        fid(request),
        content.to_owned(),
        Some(media.to_owned()),
        None,
    )
}

/// Source-mapped fragment.
pub fn frag_mapped(request: &str, content: &str, map: serde_json::Value) -> Fragment {
    Fragment::new(
        fid(request),
        content.to_owned(),
        None,
        Some(SourceMap::new(map)),
    )
}

/// Entry ordering from a request sequence; positions are 0, 1, 2, ...
pub fn entry(name: &str, order: &[&str]) -> EntryOrdering {
    EntryOrdering::new(
        EntryId::new(name).expect("valid entry name"),
        order
            .iter()
            .enumerate()
            .map(|(i, request)| (fid(request), u32::try_from(i).expect("small index"))),
    )
}

/// Target input in full per-entry mode.
pub fn target_input(
    name: &str,
    fragments: Vec<Fragment>,
    entries: Vec<EntryOrdering>,
) -> TargetInput {
    TargetInput {
        target: TargetId::new(name).expect("valid target name"),
        fragments,
        orderings: OrderingInput::PerEntry(entries),
    }
}

/// Target input in degraded flat-index mode.
pub fn flat_input(name: &str, fragments: Vec<Fragment>, indices: &[(&str, u32)]) -> TargetInput {
    TargetInput {
        target: TargetId::new(name).expect("valid target name"),
        fragments,
        orderings: OrderingInput::Flat(
            indices
                .iter()
                .map(|&(request, idx)| (fid(request), idx))
                .collect(),
        ),
    }
}

/// Requests of a resolved order, for compact assertions.
pub fn requests<'a>(order: &[&'a Fragment]) -> Vec<&'a str> {
    order.iter().map(|f| f.id().request()).collect()
}
