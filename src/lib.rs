//! weft — deterministic ordering and concatenation of style fragments.
//!
//! Given one output target's style fragments and the per-entry traversal
//! orders observed by the upstream dependency graph, weft computes a single
//! deterministic total order, renders the fragments into one artifact
//! (external imports hoisted, media scopes wrapped, source maps preserved),
//! and fingerprints the fragment set for cache-busting filenames.
//!
//! The typed entry point is [`pipeline::run_extract_phase`]; the individual
//! stages ([`resolve`], [`render`], [`fingerprint`]) are public for
//! embedders that compose them directly.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod resolve;
