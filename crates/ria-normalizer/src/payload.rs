//! Classification of raw backend payloads

use crate::canonical;
use ria_domain::NormalizedAnswer;
use serde_json::{Map, Value};
use std::fmt;

/// The shape a raw payload was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Already a normalized answer
    Canonical,
    /// A bare string answer
    Text,
    /// `null`, a number, a boolean or an array
    Missing,
    /// An object in the backend's native shape (or an unknown object)
    Backend,
}

impl PayloadKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Canonical => "canonical",
            PayloadKind::Text => "text",
            PayloadKind::Missing => "missing",
            PayloadKind::Backend => "backend",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw payload, classified in dispatch order
#[derive(Debug, Clone)]
pub enum RawPayload<'a> {
    /// Canonical `{answer: {steps}, evidence}` object, already read
    Canonical(Box<NormalizedAnswer>),
    /// Plain string
    Text(&'a str),
    /// Absent or not an object
    Missing,
    /// Any other object, read as the backend-native shape
    Backend(&'a Map<String, Value>),
}

impl<'a> RawPayload<'a> {
    /// Classify a raw value. `Value::Null` stands in for an absent payload.
    ///
    /// Canonical objects are read field by field, so a badly typed field
    /// drops only that field and classification never fails.
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Object(obj) if has_canonical_shape(obj) => {
                RawPayload::Canonical(Box::new(canonical::answer_from_object(obj)))
            }
            Value::Object(obj) => RawPayload::Backend(obj),
            Value::String(s) => RawPayload::Text(s),
            _ => RawPayload::Missing,
        }
    }

    /// Which shape was recognized
    pub fn kind(&self) -> PayloadKind {
        match self {
            RawPayload::Canonical(_) => PayloadKind::Canonical,
            RawPayload::Text(_) => PayloadKind::Text,
            RawPayload::Missing => PayloadKind::Missing,
            RawPayload::Backend(_) => PayloadKind::Backend,
        }
    }
}

fn has_canonical_shape(obj: &Map<String, Value>) -> bool {
    let has_steps = obj
        .get("answer")
        .and_then(Value::as_object)
        .and_then(|answer| answer.get("steps"))
        .is_some_and(Value::is_array);
    let has_evidence = obj.get("evidence").is_some_and(Value::is_array);
    has_steps && has_evidence
}
