//! RIA Linker
//!
//! Connects citations to the evidence they point at and keeps the
//! presentation state for one answer.
//!
//! # Overview
//!
//! - [`resolve`] looks an evidence id up in a slice of evidence (first match wins)
//! - [`EvidenceIndex`] keeps a first-wins id → position map and reports
//!   duplicate ids and dangling citations
//! - [`Highlighter`] runs one cancellable clear timer per evidence entry
//! - [`AnswerSession`] owns the current answer, which cards are expanded, and
//!   the highlighter; it is replaced wholesale on every submission
//!
//! A lookup that finds nothing is not an error: navigation simply does nothing.
//!
//! # Example Usage
//!
//! ```
//! use ria_linker::AnswerSession;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut session = AnswerSession::default();
//! session.submit(&json!({
//!     "answer_markdown": "See [d.pdf | p.1 | chunk: e1]",
//!     "round1": [{"chunk_id": "e1", "doc_name": "d.pdf", "page_start": 1, "page_end": 1}]
//! }));
//!
//! let target = session.navigate("e1").map(|nav| nav.position);
//! assert_eq!(target, Some(0));
//! assert!(session.is_expanded("e1"));
//! assert!(session.is_highlighted("e1"));
//!
//! assert!(session.navigate("nope").is_none());
//! # }
//! ```

#![warn(missing_docs)]

mod index;
mod highlight;
mod session;

pub use index::{citing_steps, resolve, EvidenceIndex};
pub use highlight::{Highlighter, DEFAULT_HIGHLIGHT_MS};
pub use session::{AnswerSession, Navigation};
