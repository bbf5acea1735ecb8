//! Citation module - structured references extracted from answer text

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference from answer text to a retrieval chunk.
///
/// Produced from markers of the form `[doc.pdf | p.3-4 | chunk: abc123]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Source document name
    pub source: String,

    /// Page or page range, digits and hyphens only (e.g. "1-2")
    pub page: String,

    /// Identifier of the evidence chunk this citation points at
    pub evidence_id: String,
}

impl Citation {
    /// Create a new citation
    pub fn new(
        source: impl Into<String>,
        page: impl Into<String>,
        evidence_id: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            page: page.into(),
            evidence_id: evidence_id.into(),
        }
    }

    /// Composite key used for de-duplication within one extraction pass
    pub fn dedup_key(&self) -> String {
        format!("{}|{}|{}", self.source, self.page, self.evidence_id)
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} p.{}", self.source, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key() {
        let citation = Citation::new("doc.pdf", "1-2", "a1");
        assert_eq!(citation.dedup_key(), "doc.pdf|1-2|a1");
    }

    #[test]
    fn test_serializes_camel_case() {
        let citation = Citation::new("doc.pdf", "7", "c9");
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(json["evidenceId"], "c9");
        assert!(json.get("evidence_id").is_none());
    }

    #[test]
    fn test_display() {
        let citation = Citation::new("manual.pdf", "12-13", "x");
        assert_eq!(citation.to_string(), "manual.pdf p.12-13");
    }
}
