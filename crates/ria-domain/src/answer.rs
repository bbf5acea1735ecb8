//! Answer module - the canonical structure handed to renderers

use crate::citation::Citation;
use crate::evidence::Evidence;
use serde::{Deserialize, Serialize};

/// Verification metrics reported by the backend
///
/// A field is `None` exactly when the backend did not report a usable
/// value. Missing metrics are never coerced to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Fraction of answer claims backed by a citation (0.0-1.0)
    #[serde(default)]
    pub citation_coverage: Option<f64>,

    /// Number of answer claims without a citation, as reported
    #[serde(default)]
    pub unsupported_claims: Option<f64>,
}

impl Metrics {
    /// Metrics with nothing reported
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// One titled block of the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerStep {
    /// Step heading
    #[serde(default)]
    pub title: String,

    /// Markdown body
    #[serde(default)]
    pub body: String,

    /// Citations found in the body
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl AnswerStep {
    /// Create a step with no citations
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            citations: Vec::new(),
        }
    }

    /// Attach citations to the step
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

/// An executable instruction found in the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Display label
    #[serde(default)]
    pub label: String,

    /// The command line, exactly as it appeared (trimmed)
    pub cmd: String,

    /// Citations associated with the command
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Steps and commands making up the answer text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerBody {
    /// Answer steps in display order
    pub steps: Vec<AnswerStep>,

    /// Commands in first-occurrence order
    #[serde(default)]
    pub commands: Vec<Command>,
}

/// Backend verdict on whether the answer needs manual confirmation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Total number of claims the backend checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_claims: Option<u64>,

    /// Whether citation coverage fell below the backend threshold
    #[serde(default)]
    pub needs_confirmation: bool,

    /// Claim texts the backend could not tie to a citation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported_claim_texts: Vec<String>,
}

/// Summary of the backend's iterative retrieval loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalTrace {
    /// Number of retrieval iterations run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,

    /// Why the loop stopped (e.g. "no_new_evidence")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    /// Query used by the last iteration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_query: Option<String>,

    /// Distinct chunks gathered across iterations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_unique_chunks: Option<u64>,

    /// Refined queries in the order they were issued
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refined_queries: Vec<String>,
}

impl RetrievalTrace {
    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The canonical answer every renderer consumes
///
/// Immutable once built; a new submission replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    /// Verification metrics
    #[serde(default)]
    pub metrics: Metrics,

    /// Steps and commands
    pub answer: AnswerBody,

    /// Evidence records, round 1 first
    pub evidence: Vec<Evidence>,

    /// The backend's plan, one entry per timeline step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan: Vec<String>,

    /// Manual-confirmation verdict, when the backend sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,

    /// Retrieval loop summary, when the backend sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<RetrievalTrace>,
}

impl NormalizedAnswer {
    /// An answer made of one step and nothing else
    pub fn single_step(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            answer: AnswerBody {
                steps: vec![AnswerStep::new(title, body)],
                commands: Vec::new(),
            },
            ..Self::default()
        }
    }

    /// Every citation referenced by a step or command, in display order
    pub fn all_citations(&self) -> impl Iterator<Item = &Citation> {
        self.answer
            .steps
            .iter()
            .flat_map(|s| s.citations.iter())
            .chain(self.answer.commands.iter().flat_map(|c| c.citations.iter()))
    }
}
