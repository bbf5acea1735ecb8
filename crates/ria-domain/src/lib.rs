//! RIA Domain Layer
//!
//! The canonical answer model shared by every other crate in the workspace.
//! Nothing here parses or fetches anything: the extractor, normalizer and
//! linker crates produce and consume these values.
//!
//! ## Key Concepts
//!
//! - **Citation**: `{source, page, evidenceId}` pulled out of answer markdown
//! - **Evidence**: a retrieval chunk shown in the evidence panel
//! - **Round**: the retrieval pass that surfaced a chunk (1 = initial, 2 = refined)
//! - **NormalizedAnswer**: the single structure every renderer consumes
//!
//! The serialized form uses camelCase field names, so a normalized answer
//! written to JSON is itself a valid canonical payload.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer;
pub mod citation;
pub mod evidence;

// Re-exports for convenience
pub use answer::{
    AnswerBody, AnswerStep, Command, Metrics, NormalizedAnswer, RetrievalTrace, Review,
};
pub use citation::Citation;
pub use evidence::{Evidence, Round, UNSPECIFIED_SECTION};
