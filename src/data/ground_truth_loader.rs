// ============================================================
// Layer 4 — Ground-Truth Loader
// ============================================================
// Reads the acceptable answers for every example.
//
// File layout:
//   *.json            a JSON array, one entry per example
//   *.jsonl/.txt/.lst one JSON value per line
//
// Each entry names its answers in one of several ways:
//   {"answers": ["Paris", "Paris, France"], ...}
//   {"answer": "Paris", ...}
//   {"answer": ["Paris", "Paris, France"], ...}
//   "Paris"                                  (the entry is the answer)
//
// Two loading modes:
//   Lenient — any entry is accepted; an entry without
//             "answers"/"answer" is treated as the answer itself.
//   Strict  — an entry must be an object with "answers" or
//             "answer", otherwise loading fails. An empty
//             "answers" list means "no answer".
//
// Reference: serde_json documentation (untyped Value)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::{fs, path::Path};

use crate::domain::answer::{AnswerSet, Candidate};
use crate::domain::traits::GroundTruthSource;

/// File name suffixes read as one JSON value per line
const JSON_LINES_SUFFIXES: [&str; 3] = [".jsonl", ".txt", ".lst"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Lenient,
    Strict,
}

pub struct GroundTruthFile {
    path: String,
    mode: LoadMode,
}

impl GroundTruthFile {
    pub fn new(path: impl Into<String>, mode: LoadMode) -> Self {
        Self { path: path.into(), mode }
    }

    fn is_json_lines(&self) -> bool {
        JSON_LINES_SUFFIXES.iter().any(|s| self.path.ends_with(s))
    }

    /// Parse the file into raw JSON entries.
    fn read_entries(&self) -> Result<Vec<Value>> {
        let text = fs::read_to_string(Path::new(&self.path))
            .with_context(|| format!("Cannot read ground-truth file '{}'", self.path))?;

        if self.is_json_lines() {
            text.lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    serde_json::from_str(line).with_context(|| {
                        format!("Invalid JSON in '{}' line {}", self.path, i + 1)
                    })
                })
                .collect()
        } else {
            serde_json::from_str(&text)
                .with_context(|| format!("'{}' is not a JSON array of examples", self.path))
        }
    }
}

impl GroundTruthSource for GroundTruthFile {
    fn load_all(&self) -> Result<Vec<AnswerSet>> {
        let entries = self.read_entries()?;

        let answers: Vec<AnswerSet> = match self.mode {
            LoadMode::Lenient => entries.iter().map(lenient_answers).collect(),
            LoadMode::Strict => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    strict_answers(entry)
                        .with_context(|| format!("'{}' example {}", self.path, i))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        tracing::debug!(
            "Loaded {} ground-truth examples from '{}' ({:?})",
            answers.len(),
            self.path,
            self.mode
        );
        Ok(answers)
    }
}

/// "answers", then "answer", then the entry itself.
fn lenient_answers(entry: &Value) -> AnswerSet {
    match entry {
        Value::Object(map) => match map.get("answers").or_else(|| map.get("answer")) {
            Some(value) => AnswerSet::from_json(value),
            None => AnswerSet::from_json(entry),
        },
        other => AnswerSet::from_json(other),
    }
}

fn strict_answers(entry: &Value) -> Result<AnswerSet> {
    let Value::Object(map) = entry else {
        bail!("need to have answer or answers");
    };

    if let Some(answers) = map.get("answers") {
        return Ok(match answers {
            Value::Array(items) if items.is_empty() => AnswerSet::new(vec![Candidate::NoAnswer]),
            other => AnswerSet::from_json(other),
        });
    }

    match map.get("answer") {
        Some(Value::String(s)) => Ok(AnswerSet::single(s.clone())),
        Some(list @ Value::Array(_)) => Ok(AnswerSet::from_json(list)),
        // Numbers, booleans and the like are compared by their JSON text
        Some(other) => Ok(AnswerSet::single(other.to_string())),
        None => bail!("need to have answer or answers"),
    }
}
