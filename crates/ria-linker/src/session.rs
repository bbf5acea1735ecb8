//! Presentation state for the current answer

use crate::highlight::Highlighter;
use crate::index::EvidenceIndex;
use ria_domain::{Evidence, NormalizedAnswer};
use ria_normalizer::Normalizer;
use serde_json::Value;
use std::collections::HashSet;
use tokio::time::Duration;
use tracing::debug;

/// Where a successful navigation landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigation<'a> {
    /// Position of the card in the evidence list (the scroll target)
    pub position: usize,
    /// The evidence record
    pub evidence: &'a Evidence,
}

#[derive(Debug)]
struct LoadedAnswer {
    answer: NormalizedAnswer,
    index: EvidenceIndex,
    expanded: HashSet<String>,
}

/// Owns the single current answer and its view state
///
/// A submission replaces everything wholesale: the answer, the expanded
/// cards and any highlight. There is no history.
#[derive(Debug, Default)]
pub struct AnswerSession {
    normalizer: Normalizer,
    current: Option<LoadedAnswer>,
    highlighter: Highlighter,
}

impl AnswerSession {
    /// Create a session with a specific normalizer and highlight interval
    pub fn new(normalizer: Normalizer, highlight: Duration) -> Self {
        Self {
            normalizer,
            current: None,
            highlighter: Highlighter::new(highlight),
        }
    }

    /// Normalize a raw payload and make it the current answer
    pub fn submit(&mut self, raw: &Value) -> &NormalizedAnswer {
        let answer = self.normalizer.normalize(raw);
        self.load(answer)
    }

    /// Make an already normalized answer the current one
    pub fn load(&mut self, answer: NormalizedAnswer) -> &NormalizedAnswer {
        self.highlighter.cancel_all();
        let index = EvidenceIndex::new(&answer.evidence);
        debug!(
            "Loaded answer: {} steps, {} evidence records",
            answer.answer.steps.len(),
            answer.evidence.len()
        );
        let loaded = self.current.insert(LoadedAnswer {
            answer,
            index,
            expanded: HashSet::new(),
        });
        &loaded.answer
    }

    /// Discard the current answer
    pub fn clear(&mut self) {
        self.highlighter.cancel_all();
        self.current = None;
    }

    /// The current answer, if any
    pub fn current(&self) -> Option<&NormalizedAnswer> {
        self.current.as_ref().map(|c| &c.answer)
    }

    /// Index over the current answer's evidence
    pub fn index(&self) -> Option<&EvidenceIndex> {
        self.current.as_ref().map(|c| &c.index)
    }

    /// Look up evidence in the current answer without touching view state
    pub fn resolve(&self, evidence_id: &str) -> Option<&Evidence> {
        let current = self.current.as_ref()?;
        let position = current.index.position(evidence_id)?;
        current.answer.evidence.get(position)
    }

    /// Follow a citation to its evidence card.
    ///
    /// On success the card is expanded and highlighted, and its position is
    /// returned for scrolling. An unknown id changes nothing and returns
    /// `None`. Outside a Tokio runtime the highlight is not cleared on a timer.
    pub fn navigate(&mut self, evidence_id: &str) -> Option<Navigation<'_>> {
        let current = self.current.as_mut()?;
        let Some(position) = current.index.position(evidence_id) else {
            debug!("No evidence for {}, navigation ignored", evidence_id);
            return None;
        };

        current.expanded.insert(evidence_id.to_string());
        self.highlighter.highlight(evidence_id);

        let evidence = current.answer.evidence.get(position)?;
        Some(Navigation { position, evidence })
    }

    /// Flip a card between expanded and collapsed; unknown ids are ignored.
    /// Returns the new expanded state.
    pub fn toggle_expanded(&mut self, evidence_id: &str) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if !current.index.contains(evidence_id) {
            return false;
        }
        if current.expanded.remove(evidence_id) {
            false
        } else {
            current.expanded.insert(evidence_id.to_string())
        }
    }

    /// Whether a card is expanded
    pub fn is_expanded(&self, evidence_id: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.expanded.contains(evidence_id))
    }

    /// Whether a card is highlighted
    pub fn is_highlighted(&self, evidence_id: &str) -> bool {
        self.highlighter.is_highlighted(evidence_id)
    }

    /// The highlighter driving transient highlights
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "answer_markdown": "Stop with [a.pdf | p.1-2 | chunk: e1] or [b.pdf | p.3 | chunk: gone]",
            "round1": [
                {"chunk_id": "e1", "doc_name": "a.pdf", "page_start": 1, "page_end": 2},
                {"chunk_id": "e2", "doc_name": "b.pdf", "page_start": 5, "page_end": 5}
            ],
            "round2": [
                {"chunk_id": "e3", "doc_name": "c.pdf", "page_start": 9, "page_end": 9}
            ]
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_expands_and_highlights() {
        let mut session = AnswerSession::default();
        session.submit(&payload());

        let nav = session.navigate("e3").unwrap();
        assert_eq!(nav.position, 2);
        assert_eq!(nav.evidence.title, "c.pdf");
        assert!(session.is_expanded("e3"));
        assert!(session.is_highlighted("e3"));
        assert!(!session.is_expanded("e1"));

        tokio::time::sleep(Duration::from_millis(1300)).await;
        assert!(!session.is_highlighted("e3"));
        assert!(session.is_expanded("e3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dangling_navigation_changes_nothing() {
        let mut session = AnswerSession::default();
        session.submit(&payload());
        session.navigate("e1");

        assert!(session.navigate("gone").is_none());
        assert!(!session.is_expanded("gone"));
        assert!(!session.is_highlighted("gone"));
        assert!(session.is_expanded("e1"));
        assert_eq!(session.highlighter().highlighted(), vec!["e1".to_string()]);
    }

    #[test]
    fn test_navigate_outside_runtime() {
        let mut session = AnswerSession::default();
        session.submit(&payload());

        let nav = session.navigate("e1").unwrap();
        assert_eq!(nav.position, 0);
        assert!(session.is_expanded("e1"));
        assert!(session.is_highlighted("e1"));

        session.submit(&payload());
        assert!(!session.is_highlighted("e1"));
    }

    #[test]
    fn test_navigate_without_answer() {
        let mut session = AnswerSession::default();
        assert!(session.navigate("e1").is_none());
        assert!(session.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_replaces_wholesale() {
        let mut session = AnswerSession::default();
        session.submit(&payload());
        session.navigate("e1");

        let answer = session.submit(&json!("plain text answer"));
        assert_eq!(answer.answer.steps[0].body, "plain text answer");
        assert!(!session.is_expanded("e1"));
        assert!(!session.is_highlighted("e1"));
        assert!(session.resolve("e1").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear() {
        let mut session = AnswerSession::default();
        session.submit(&payload());
        session.navigate("e2");
        session.clear();
        assert!(session.current().is_none());
        assert!(!session.is_highlighted("e2"));
        assert!(session.index().is_none());
    }

    #[test]
    fn test_toggle_expanded() {
        let mut session = AnswerSession::default();
        session.submit(&payload());
        assert!(session.toggle_expanded("e2"));
        assert!(session.is_expanded("e2"));
        assert!(!session.toggle_expanded("e2"));
        assert!(!session.is_expanded("e2"));
        assert!(!session.toggle_expanded("gone"));
        assert!(!session.is_expanded("gone"));
    }

    #[test]
    fn test_resolve_does_not_expand() {
        let mut session = AnswerSession::default();
        session.submit(&payload());
        assert_eq!(session.resolve("e2").unwrap().title, "b.pdf");
        assert!(!session.is_expanded("e2"));
    }
}
