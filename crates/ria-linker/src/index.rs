//! Evidence lookup and citation cross-referencing

use ria_domain::{Citation, Evidence, NormalizedAnswer};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Find the evidence record with the given id.
///
/// Exact id equality; when ids repeat, the first record wins. Records
/// without an id never match.
pub fn resolve<'a>(evidence_id: &str, evidence: &'a [Evidence]) -> Option<&'a Evidence> {
    evidence.iter().find(|e| e.has_id(evidence_id))
}

/// Indexes of the answer steps that cite the given evidence id
pub fn citing_steps(answer: &NormalizedAnswer, evidence_id: &str) -> Vec<usize> {
    answer
        .answer
        .steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.citations.iter().any(|c| c.evidence_id == evidence_id))
        .map(|(i, _)| i)
        .collect()
}

/// Id → position map over one answer's evidence list
#[derive(Debug, Clone, Default)]
pub struct EvidenceIndex {
    positions: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl EvidenceIndex {
    /// Build an index; the first record carrying an id owns it
    pub fn new(evidence: &[Evidence]) -> Self {
        let mut positions = HashMap::with_capacity(evidence.len());
        let mut duplicates = Vec::new();

        for (position, record) in evidence.iter().enumerate() {
            let Some(id) = record.id.as_deref() else {
                continue;
            };
            if positions.contains_key(id) {
                if !duplicates.iter().any(|d| d == id) {
                    duplicates.push(id.to_string());
                }
            } else {
                positions.insert(id.to_string(), position);
            }
        }

        if !duplicates.is_empty() {
            warn!(
                "Evidence ids repeat ({}); lookups use the first occurrence",
                duplicates.join(", ")
            );
        }

        Self { positions, duplicates }
    }

    /// Position of the evidence record with the given id
    pub fn position(&self, evidence_id: &str) -> Option<usize> {
        self.positions.get(evidence_id).copied()
    }

    /// Whether any record carries the given id
    pub fn contains(&self, evidence_id: &str) -> bool {
        self.positions.contains_key(evidence_id)
    }

    /// Ids that appeared on more than one record, in first-repeat order
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of addressable records
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no record is addressable
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Citations in the answer whose evidence id matches no record,
    /// one per evidence id, in display order
    pub fn dangling<'a>(&self, answer: &'a NormalizedAnswer) -> Vec<&'a Citation> {
        let mut seen = HashSet::new();
        answer
            .all_citations()
            .filter(|c| !self.contains(&c.evidence_id))
            .filter(|c| seen.insert(c.evidence_id.as_str()))
            .collect()
    }
}
