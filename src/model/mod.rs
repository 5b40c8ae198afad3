//! weft data model — fragments, identities, and per-entry orderings.

pub mod fragment;
pub mod ordering;
pub mod types;
