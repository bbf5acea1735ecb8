//! RIA Normalizer
//!
//! Turns whatever the backend sent into a [`NormalizedAnswer`].
//!
//! # Architecture
//!
//! ```text
//! raw JSON → RawPayload::classify → (canonical | text | missing | backend) → NormalizedAnswer
//!                                                              │
//!                                               PatternExtractor (citations, commands)
//! ```
//!
//! Normalization is total: every input, including `null`, numbers, arrays and
//! half-filled objects, produces a renderable answer. Normalizing an already
//! normalized answer returns it unchanged.
//!
//! # Example Usage
//!
//! ```
//! use ria_normalizer::normalize;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "answer_markdown": "Use [d.pdf | p.1-2 | chunk: e1]",
//!     "round1": [{"chunk_id": "e1", "doc_name": "d.pdf", "page_start": 1,
//!                 "page_end": 2, "section": "Intro", "text": "..."}],
//!     "round2": [],
//!     "verification": {"citation_coverage": 0.8, "unsupported_claims": 1}
//! });
//!
//! let answer = normalize(&raw);
//! assert_eq!(answer.answer.steps[0].citations[0].evidence_id, "e1");
//! assert_eq!(answer.metrics.citation_coverage, Some(0.8));
//! assert_eq!(answer.evidence.len(), 1);
//! ```
//!
//! [`NormalizedAnswer`]: ria_domain::NormalizedAnswer

#![warn(missing_docs)]

mod canonical;
mod fields;
mod payload;
mod normalizer;

pub use payload::{PayloadKind, RawPayload};
pub use normalizer::{
    normalize, normalize_body, Normalizer, ANSWER_TITLE, COMMAND_LABEL, FINAL_ANSWER_TITLE,
    NO_ANSWER_RETURNED, NO_RESPONSE_RETURNED,
};
