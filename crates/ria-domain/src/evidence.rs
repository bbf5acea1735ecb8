//! Evidence module - retrieval chunks shown alongside an answer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Section marker used when a retrieval record carries no section name
pub const UNSPECIFIED_SECTION: &str = "UNSPECIFIED";

/// Retrieval pass that produced an evidence record
///
/// Serialized as the bare numbers `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    /// First retrieval pass over the raw question
    #[default]
    Initial,

    /// Second pass over the refined query
    Refined,
}

impl Round {
    /// Numeric form used on the wire
    pub fn number(&self) -> u8 {
        match self {
            Round::Initial => 1,
            Round::Refined => 2,
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::Initial),
            2 => Ok(Round::Refined),
            other => Err(format!("Invalid round: {}", other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.number())
    }
}

/// A retrieval chunk surfaced to justify part of an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// Stable chunk identifier; `None` when the backend omitted it, in
    /// which case no citation can ever resolve to this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Document name
    #[serde(default)]
    pub title: String,

    /// Display metadata, `p.<start>-<end> • <section>`
    #[serde(default)]
    pub meta: String,

    /// Chunk text
    #[serde(default)]
    pub snippet: String,

    /// Retrieval pass that produced this chunk
    #[serde(default)]
    pub round: Round,
}

impl Evidence {
    /// Build the `meta` line from page bounds and section name
    ///
    /// # Examples
    ///
    /// ```
    /// use ria_domain::Evidence;
    ///
    /// assert_eq!(Evidence::format_meta("3", "4", "Install"), "p.3-4 • Install");
    /// ```
    pub fn format_meta(page_start: &str, page_end: &str, section: &str) -> String {
        format!("p.{}-{} • {}", page_start, page_end, section)
    }

    /// Whether this record is addressable by the given id
    pub fn has_id(&self, evidence_id: &str) -> bool {
        self.id.as_deref() == Some(evidence_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Evidence {
        Evidence {
            id: Some("c1".to_string()),
            title: "d".to_string(),
            meta: Evidence::format_meta("1", "2", UNSPECIFIED_SECTION),
            snippet: "t".to_string(),
            round: Round::Initial,
        }
    }

    #[test]
    fn test_round_serializes_as_number() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["round"], 1);
        assert_eq!(json["meta"], "p.1-2 • UNSPECIFIED");
    }

    #[test]
    fn test_round_rejects_unknown_pass() {
        assert!(Round::try_from(3).is_err());
        let parsed: Result<Evidence, _> =
            serde_json::from_str(r#"{"id":"x","title":"t","meta":"m","snippet":"s","round":7}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_id_is_omitted() {
        let mut evidence = sample();
        evidence.id = None;
        let json = serde_json::to_value(&evidence).unwrap();
        assert!(json.get("id").is_none());
        assert!(!evidence.has_id(""));
    }

    #[test]
    fn test_has_id() {
        assert!(sample().has_id("c1"));
        assert!(!sample().has_id("c2"));
    }

    #[test]
    fn test_round_display() {
        assert_eq!(Round::Refined.to_string(), "R2");
    }
}
