// ============================================================
// Layer 3 — Answer Domain Types
// ============================================================
// Every example in a ground-truth dataset lists one or more
// acceptable answers. Datasets are inconsistent about how they
// spell this out, so each acceptable answer is a Candidate:
//
//   "Paris"                 → Candidate::Text("Paris")
//   {"text": "Paris", ...}  → Candidate::Text("Paris")
//   null                    → Candidate::NoAnswer
//   42, {"start": 3}, ...   → Candidate::Malformed(raw JSON)
//
// A Malformed candidate is kept rather than rejected at load
// time: the scoring layer decides to skip that example and
// counts it, so the bad entry is reported instead of lost.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One acceptable answer for an example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Candidate {
    /// A plain answer string
    Text(String),

    /// The dataset explicitly has no answer for this example
    NoAnswer,

    /// Something that is neither a string, a {"text": ..} object,
    /// nor null. Holds the raw JSON for diagnostics.
    Malformed(String),
}

impl Candidate {
    /// Interpret a JSON value as a single candidate answer.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Candidate::Text(s.clone()),
            Value::Null      => Candidate::NoAnswer,
            Value::Object(map) => match map.get("text") {
                Some(Value::String(s)) => Candidate::Text(s.clone()),
                _ => Candidate::Malformed(value.to_string()),
            },
            other => Candidate::Malformed(other.to_string()),
        }
    }

    /// The answer text, if this candidate has one
    pub fn text(&self) -> Option<&str> {
        match self {
            Candidate::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// All acceptable answers for one example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    candidates: Vec<Candidate>,
}

impl AnswerSet {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// An answer set with exactly one textual answer.
    pub fn single(text: impl Into<String>) -> Self {
        Self::new(vec![Candidate::Text(text.into())])
    }

    /// Build an answer set from a JSON value that is either a list
    /// of candidates or a single candidate.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::new(items.iter().map(Candidate::from_json).collect()),
            single => Self::new(vec![Candidate::from_json(single)]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate over the textual answers, skipping NoAnswer entries.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().filter_map(Candidate::text)
    }

    /// The first malformed candidate, if any
    pub fn first_malformed(&self) -> Option<&str> {
        self.candidates.iter().find_map(|c| match c {
            Candidate::Malformed(raw) => Some(raw.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_from_text_object() {
        let c = Candidate::from_json(&json!({"text": "Paris", "answer_start": 12}));
        assert_eq!(c, Candidate::Text("Paris".to_string()));
    }

    #[test]
    fn test_candidate_object_without_text_is_malformed() {
        let c = Candidate::from_json(&json!({"answer_start": 12}));
        assert!(matches!(c, Candidate::Malformed(_)));
    }

    #[test]
    fn test_answer_set_from_scalar_string() {
        let set = AnswerSet::from_json(&json!("Paris"));
        assert_eq!(set, AnswerSet::single("Paris"));
    }

    #[test]
    fn test_texts_skips_no_answer() {
        let set = AnswerSet::from_json(&json!([null, "Paris", {"text": "France"}]));
        let texts: Vec<&str> = set.texts().collect();
        assert_eq!(texts, vec!["Paris", "France"]);
        assert!(set.first_malformed().is_none());
    }

    #[test]
    fn test_first_malformed_reports_raw_json() {
        let set = AnswerSet::from_json(&json!(["Paris", 42]));
        assert_eq!(set.first_malformed(), Some("42"));
    }
}
