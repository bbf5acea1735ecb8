//! Core Normalizer implementation

use crate::fields;
use crate::payload::RawPayload;
use ria_domain::{
    AnswerBody, AnswerStep, Command, Evidence, Metrics, NormalizedAnswer, RetrievalTrace, Review,
    Round, UNSPECIFIED_SECTION,
};
use ria_extractor::PatternExtractor;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Title of the single step built from a plain-string payload
pub const ANSWER_TITLE: &str = "Answer";

/// Title of the step built from backend markdown
pub const FINAL_ANSWER_TITLE: &str = "Final answer";

/// Label given to every extracted command
pub const COMMAND_LABEL: &str = "Command";

/// Body used when there is no payload at all
pub const NO_RESPONSE_RETURNED: &str = "No response returned.";

/// Body used when a backend payload carries no markdown
pub const NO_ANSWER_RETURNED: &str = "No answer returned.";

/// Shown for a page bound the backend did not send
const UNKNOWN_PAGE: &str = "?";

/// Shown for a record without a document name
const UNKNOWN_DOCUMENT: &str = "UNKNOWN";

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Converts raw payloads into [`NormalizedAnswer`]s
///
/// Stateless apart from its compiled patterns; safe to share and to call
/// concurrently.
#[derive(Debug, Clone)]
pub struct Normalizer {
    extractor: PatternExtractor,
}

impl Normalizer {
    /// Create a normalizer using a specific extractor
    pub fn new(extractor: PatternExtractor) -> Self {
        Self { extractor }
    }

    /// Normalize a raw payload. `Value::Null` stands for "no payload".
    pub fn normalize(&self, raw: &Value) -> NormalizedAnswer {
        let payload = RawPayload::classify(raw);
        debug!("Normalizing {} payload", payload.kind());

        match payload {
            RawPayload::Canonical(answer) => *answer,
            RawPayload::Text(text) => NormalizedAnswer::single_step(ANSWER_TITLE, text),
            RawPayload::Missing => NormalizedAnswer::single_step(ANSWER_TITLE, NO_RESPONSE_RETURNED),
            RawPayload::Backend(obj) => self.normalize_backend(obj),
        }
    }

    /// Normalize a response body.
    ///
    /// JSON bodies go through [`Normalizer::normalize`]; a blank body counts
    /// as no payload and any other text is treated as a plain-string answer.
    pub fn normalize_body(&self, body: &str) -> NormalizedAnswer {
        if body.trim().is_empty() {
            return self.normalize(&Value::Null);
        }
        match serde_json::from_str::<Value>(body) {
            Ok(raw) => self.normalize(&raw),
            Err(e) => {
                debug!("Body is not JSON ({}), treating it as text", e);
                self.normalize(&Value::String(body.to_string()))
            }
        }
    }

    fn normalize_backend(&self, obj: &Map<String, Value>) -> NormalizedAnswer {
        let verification = obj.get("verification").and_then(Value::as_object);
        let metrics = Metrics {
            citation_coverage: fields::number(verification.and_then(|v| v.get("citation_coverage"))),
            unsupported_claims: fields::non_negative(verification.and_then(|v| v.get("unsupported_claims"))),
        };

        let mut evidence = evidence_from_round(obj.get("round1"), Round::Initial);
        evidence.extend(evidence_from_round(obj.get("round2"), Round::Refined));

        let markdown = fields::non_empty_text(obj.get("answer_markdown"))
            .unwrap_or_else(|| NO_ANSWER_RETURNED.to_string());
        let citations = self.extractor.extract_citations(&markdown);

        // Each command gets the full citation list, not the markers near it.
        let commands = self
            .extractor
            .extract_commands(&markdown)
            .into_iter()
            .map(|cmd| Command {
                label: COMMAND_LABEL.to_string(),
                cmd,
                citations: citations.clone(),
            })
            .collect();

        debug!(
            "Backend payload: {} evidence records, {} citations",
            evidence.len(),
            citations.len()
        );

        NormalizedAnswer {
            metrics,
            answer: AnswerBody {
                steps: vec![AnswerStep::new(FINAL_ANSWER_TITLE, markdown).with_citations(citations)],
                commands,
            },
            evidence,
            plan: fields::strings(obj.get("plan")),
            review: verification.and_then(review_from_verification),
            trace: trace_from_payload(obj),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(PatternExtractor::shared().clone())
    }
}

/// Normalize a raw payload with the default command whitelist.
///
/// Total: never panics and always returns a renderable answer.
pub fn normalize(raw: &Value) -> NormalizedAnswer {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Normalize a response body with the default command whitelist.
pub fn normalize_body(body: &str) -> NormalizedAnswer {
    DEFAULT_NORMALIZER.normalize_body(body)
}

fn evidence_from_round(records: Option<&Value>, round: Round) -> Vec<Evidence> {
    let Some(records) = records.and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(record) => Some(evidence_from_record(record, round)),
            None => {
                warn!("Skipping {} evidence record that is not an object", round);
                None
            }
        })
        .collect()
}

fn evidence_from_record(record: &Map<String, Value>, round: Round) -> Evidence {
    let page_start = fields::text(record.get("page_start")).unwrap_or_else(|| UNKNOWN_PAGE.to_string());
    let page_end = fields::text(record.get("page_end")).unwrap_or_else(|| UNKNOWN_PAGE.to_string());
    let section = fields::non_empty_text(record.get("section"))
        .unwrap_or_else(|| UNSPECIFIED_SECTION.to_string());

    Evidence {
        id: fields::non_empty_text(record.get("chunk_id")),
        title: fields::non_empty_text(record.get("doc_name"))
            .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string()),
        meta: Evidence::format_meta(&page_start, &page_end, &section),
        snippet: fields::text(record.get("text")).unwrap_or_default(),
        round,
    }
}

fn review_from_verification(verification: &Map<String, Value>) -> Option<Review> {
    let total_claims = fields::count(verification.get("total_claims"));
    let needs_confirmation = verification.get("needs_confirmation").and_then(Value::as_bool);
    let unsupported_claim_texts = fields::strings(verification.get("unsupported_claim_texts"));

    if total_claims.is_none() && needs_confirmation.is_none() && unsupported_claim_texts.is_empty() {
        return None;
    }

    Some(Review {
        total_claims,
        needs_confirmation: needs_confirmation.unwrap_or(false),
        unsupported_claim_texts,
    })
}

fn trace_from_payload(obj: &Map<String, Value>) -> Option<RetrievalTrace> {
    let trace = obj.get("trace").and_then(Value::as_object);
    let field = |name: &str| trace.and_then(|t| t.get(name));

    let summary = RetrievalTrace {
        iterations: fields::count(field("iterations")),
        stop_reason: fields::non_empty_text(field("stop_reason")),
        final_query: fields::non_empty_text(field("final_query")),
        total_unique_chunks: fields::count(field("total_unique_chunks")),
        refined_queries: fields::strings(obj.get("refined_queries")),
    };

    (!summary.is_empty()).then_some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ria_domain::Citation;
    use ria_extractor::ExtractorConfig;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        let answer = normalize(&json!("hello"));
        assert_eq!(answer.answer.steps.len(), 1);
        assert_eq!(answer.answer.steps[0].title, ANSWER_TITLE);
        assert_eq!(answer.answer.steps[0].body, "hello");
        assert!(answer.answer.steps[0].citations.is_empty());
        assert_eq!(answer.metrics, Metrics::unknown());
        assert!(answer.evidence.is_empty());
    }

    #[test]
    fn test_plain_string_citations_not_extracted() {
        let answer = normalize(&json!("See [d.pdf | p.1 | chunk: a]"));
        assert!(answer.answer.steps[0].citations.is_empty());
    }

    #[test]
    fn test_missing_payloads() {
        for raw in [json!(null), json!(42), json!(false), json!([{"answer_markdown": "x"}])] {
            let answer = normalize(&raw);
            assert_eq!(answer.answer.steps.len(), 1);
            assert_eq!(answer.answer.steps[0].body, NO_RESPONSE_RETURNED);
            assert_eq!(answer.metrics, Metrics::unknown());
            assert!(answer.evidence.is_empty());
        }
    }

    #[test]
    fn test_empty_object_uses_backend_defaults() {
        let answer = normalize(&json!({}));
        assert_eq!(answer.answer.steps[0].title, FINAL_ANSWER_TITLE);
        assert_eq!(answer.answer.steps[0].body, NO_ANSWER_RETURNED);
        assert_eq!(answer.metrics, Metrics::unknown());
        assert!(answer.evidence.is_empty());
        assert!(answer.answer.commands.is_empty());
        assert!(answer.review.is_none());
        assert!(answer.trace.is_none());
    }

    #[test]
    fn test_evidence_mapping() {
        let raw = json!({
            "round1": [{"chunk_id": "c1", "doc_name": "d", "page_start": 1, "page_end": 2,
                        "section": null, "text": "t"}]
        });
        let answer = normalize(&raw);
        assert_eq!(
            answer.evidence,
            vec![Evidence {
                id: Some("c1".to_string()),
                title: "d".to_string(),
                meta: "p.1-2 • UNSPECIFIED".to_string(),
                snippet: "t".to_string(),
                round: Round::Initial,
            }]
        );
    }

    #[test]
    fn test_rounds_concatenated_in_order() {
        let raw = json!({
            "round1": [{"chunk_id": "a"}, {"chunk_id": "b"}],
            "round2": [{"chunk_id": "c"}]
        });
        let answer = normalize(&raw);
        let rounds: Vec<_> = answer
            .evidence
            .iter()
            .map(|e| (e.id.clone().unwrap(), e.round))
            .collect();
        assert_eq!(
            rounds,
            vec![
                ("a".to_string(), Round::Initial),
                ("b".to_string(), Round::Initial),
                ("c".to_string(), Round::Refined),
            ]
        );
    }

    #[test]
    fn test_sparse_record_defaults() {
        let raw = json!({"round2": [{"page_start": "4"}, "junk", null]});
        let answer = normalize(&raw);
        assert_eq!(answer.evidence.len(), 1);
        let evidence = &answer.evidence[0];
        assert_eq!(evidence.id, None);
        assert_eq!(evidence.title, "UNKNOWN");
        assert_eq!(evidence.meta, "p.4-? • UNSPECIFIED");
        assert_eq!(evidence.snippet, "");
        assert_eq!(evidence.round, Round::Refined);
    }

    #[test]
    fn test_empty_section_is_unspecified() {
        let raw = json!({"round1": [{"chunk_id": "x", "page_start": 1, "page_end": 1, "section": ""}]});
        assert_eq!(normalize(&raw).evidence[0].meta, "p.1-1 • UNSPECIFIED");
    }

    #[test]
    fn test_metrics_absent_stay_null() {
        let raw = json!({"verification": {"citation_coverage": null}});
        assert_eq!(normalize(&raw).metrics, Metrics::unknown());
    }

    #[test]
    fn test_zero_metrics_are_not_null() {
        let raw = json!({"verification": {"citation_coverage": 0.0, "unsupported_claims": 0}});
        let metrics = normalize(&raw).metrics;
        assert_eq!(metrics.citation_coverage, Some(0.0));
        assert_eq!(metrics.unsupported_claims, Some(0.0));
    }

    #[test]
    fn test_unparseable_metrics_are_null() {
        let raw = json!({"verification": {"citation_coverage": "high", "unsupported_claims": -2}});
        assert_eq!(normalize(&raw).metrics, Metrics::unknown());
    }

    #[test]
    fn test_commands_carry_all_citations() {
        let raw = json!({
            "answer_markdown": "Stop it [a.pdf | p.1 | chunk: a1]\n\nstopaiw\nthen [b.pdf | p.2 | chunk: b2]\nstartaiw"
        });
        let answer = normalize(&raw);
        let expected = vec![Citation::new("a.pdf", "1", "a1"), Citation::new("b.pdf", "2", "b2")];
        assert_eq!(answer.answer.steps[0].citations, expected);
        assert_eq!(answer.answer.commands.len(), 2);
        for command in &answer.answer.commands {
            assert_eq!(command.label, COMMAND_LABEL);
            assert_eq!(command.citations, expected);
        }
        assert_eq!(answer.answer.commands[0].cmd, "stopaiw");
        assert_eq!(answer.answer.commands[1].cmd, "startaiw");
    }

    #[test]
    fn test_custom_whitelist() {
        let extractor = PatternExtractor::new(ExtractorConfig::with_tokens(["docker"])).unwrap();
        let normalizer = Normalizer::new(extractor);
        let answer = normalizer.normalize(&json!({"answer_markdown": "docker ps\nps aux"}));
        let cmds: Vec<_> = answer.answer.commands.iter().map(|c| c.cmd.as_str()).collect();
        assert_eq!(cmds, vec!["docker ps"]);
    }

    #[test]
    fn test_backend_extras_preserved() {
        let raw = json!({
            "plan": ["Identify intent", "Retrieve evidence", 7],
            "refined_queries": ["stop rpd stopaiw"],
            "verification": {
                "citation_coverage": 0.5,
                "unsupported_claims": 2,
                "total_claims": 4,
                "needs_confirmation": true,
                "unsupported_claim_texts": ["- first", "- second"]
            },
            "trace": {"iterations": 2, "stop_reason": "no_new_evidence",
                      "final_query": "stop rpd", "total_unique_chunks": 9},
            "answer_markdown": "x"
        });
        let answer = normalize(&raw);
        assert_eq!(answer.plan, vec!["Identify intent", "Retrieve evidence"]);
        let review = answer.review.unwrap();
        assert_eq!(review.total_claims, Some(4));
        assert!(review.needs_confirmation);
        assert_eq!(review.unsupported_claim_texts.len(), 2);
        let trace = answer.trace.unwrap();
        assert_eq!(trace.iterations, Some(2));
        assert_eq!(trace.stop_reason.as_deref(), Some("no_new_evidence"));
        assert_eq!(trace.total_unique_chunks, Some(9));
        assert_eq!(trace.refined_queries, vec!["stop rpd stopaiw"]);
    }

    #[test]
    fn test_canonical_returned_unchanged() {
        let answer = normalize(&json!({
            "answer_markdown": "ps aux [d.pdf | p.1-2 | chunk: e1]",
            "round1": [{"chunk_id": "e1", "doc_name": "d.pdf", "page_start": 1, "page_end": 2}],
            "verification": {"citation_coverage": 1.0, "unsupported_claims": 0}
        }));
        let again = normalize(&serde_json::to_value(&answer).unwrap());
        assert_eq!(again, answer);
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body("").answer.steps[0].body, NO_RESPONSE_RETURNED);
        assert_eq!(normalize_body("not json").answer.steps[0].body, "not json");
        assert_eq!(normalize_body("\"quoted\"").answer.steps[0].body, "quoted");
        assert_eq!(
            normalize_body(r#"{"answer_markdown": "hi"}"#).answer.steps[0].title,
            FINAL_ANSWER_TITLE
        );
    }
}
