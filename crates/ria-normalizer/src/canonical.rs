//! Field-by-field reading of already normalized answers

use crate::fields;
use crate::normalizer::COMMAND_LABEL;
use ria_domain::{
    AnswerBody, AnswerStep, Citation, Command, Evidence, Metrics, NormalizedAnswer,
    RetrievalTrace, Review, Round,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Read a canonical `{metrics, answer: {steps, commands}, evidence}` object.
///
/// Each field is read on its own, so one badly typed value (a numeric id,
/// a float count, an unknown round) costs only that value. Entries that are
/// not objects are skipped.
pub(crate) fn answer_from_object(obj: &Map<String, Value>) -> NormalizedAnswer {
    let answer = obj.get("answer").and_then(Value::as_object);
    let part = |name: &str| answer.and_then(|a| a.get(name));

    NormalizedAnswer {
        metrics: metrics(obj.get("metrics")),
        answer: AnswerBody {
            steps: objects(part("steps"), "step").map(step).collect(),
            commands: objects(part("commands"), "command").filter_map(command).collect(),
        },
        evidence: objects(obj.get("evidence"), "evidence").map(evidence).collect(),
        plan: fields::strings(obj.get("plan")),
        review: obj.get("review").and_then(Value::as_object).map(review),
        trace: obj.get("trace").and_then(Value::as_object).map(trace),
    }
}

/// Object entries of an array field, warning about anything else
fn objects<'a>(
    value: Option<&'a Value>,
    what: &'static str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |entry| {
            let obj = entry.as_object();
            if obj.is_none() {
                warn!("Skipping {} entry that is not an object", what);
            }
            obj
        })
}

fn metrics(value: Option<&Value>) -> Metrics {
    let metrics = value.and_then(Value::as_object);
    Metrics {
        citation_coverage: fields::number(metrics.and_then(|m| m.get("citationCoverage"))),
        unsupported_claims: fields::non_negative(metrics.and_then(|m| m.get("unsupportedClaims"))),
    }
}

fn step(obj: &Map<String, Value>) -> AnswerStep {
    AnswerStep::new(
        fields::text(obj.get("title")).unwrap_or_default(),
        fields::text(obj.get("body")).unwrap_or_default(),
    )
    .with_citations(citations(obj.get("citations")))
}

/// A command without a command line is dropped
fn command(obj: &Map<String, Value>) -> Option<Command> {
    Some(Command {
        label: fields::non_empty_text(obj.get("label")).unwrap_or_else(|| COMMAND_LABEL.to_string()),
        cmd: fields::non_empty_text(obj.get("cmd"))?,
        citations: citations(obj.get("citations")),
    })
}

/// Citations without an evidence id point nowhere and are dropped
fn citations(value: Option<&Value>) -> Vec<Citation> {
    objects(value, "citation")
        .filter_map(|obj| {
            Some(Citation::new(
                fields::text(obj.get("source")).unwrap_or_default(),
                fields::text(obj.get("page")).unwrap_or_default(),
                fields::non_empty_text(obj.get("evidenceId"))?,
            ))
        })
        .collect()
}

fn evidence(obj: &Map<String, Value>) -> Evidence {
    Evidence {
        id: fields::non_empty_text(obj.get("id")),
        title: fields::text(obj.get("title")).unwrap_or_default(),
        meta: fields::text(obj.get("meta")).unwrap_or_default(),
        snippet: fields::text(obj.get("snippet")).unwrap_or_default(),
        round: round(obj.get("round")),
    }
}

/// Unknown or missing rounds count as the initial pass
fn round(value: Option<&Value>) -> Round {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Round::default();
    };
    fields::count(Some(value))
        .and_then(|n| u8::try_from(n).ok())
        .and_then(|n| Round::try_from(n).ok())
        .unwrap_or_else(|| {
            warn!("Unknown evidence round {}, using {}", value, Round::default());
            Round::default()
        })
}

fn review(obj: &Map<String, Value>) -> Review {
    Review {
        total_claims: fields::count(obj.get("totalClaims")),
        needs_confirmation: obj
            .get("needsConfirmation")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        unsupported_claim_texts: fields::strings(obj.get("unsupportedClaimTexts")),
    }
}

fn trace(obj: &Map<String, Value>) -> RetrievalTrace {
    RetrievalTrace {
        iterations: fields::count(obj.get("iterations")),
        stop_reason: fields::non_empty_text(obj.get("stopReason")),
        final_query: fields::non_empty_text(obj.get("finalQuery")),
        total_unique_chunks: fields::count(obj.get("totalUniqueChunks")),
        refined_queries: fields::strings(obj.get("refinedQueries")),
    }
}
