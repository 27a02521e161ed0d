// ============================================================
// Layer 5 — Scoring
// ============================================================
// Turns (prediction, acceptable answers) pairs into scores.
//
//   exact_match.rs — 1 if the normalized prediction equals any
//                    normalized answer, else 0
//   f1.rs          — token-overlap precision / recall / F1,
//                    best over the acceptable answers
//
// Both metrics report per-example Outcomes. An example that
// cannot be scored is Skipped with a reason; skips are left
// out of the averages but counted, so a dataset with bad
// entries shows up in the summary instead of quietly scoring
// on fewer examples.

pub mod exact_match;
pub mod f1;

use serde::{Deserialize, Serialize};

use crate::domain::answer::AnswerSet;
use crate::domain::traits::Metric;

/// Score for one example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// The metric's headline value (EM: 0 or 1, F1: 0..=1)
    pub score: f64,

    /// Token precision, for metrics that have one
    pub precision: Option<f64>,

    /// Token recall, for metrics that have one
    pub recall: Option<f64>,
}

impl MetricResult {
    pub fn new(score: f64) -> Self {
        Self { score, precision: None, recall: None }
    }

    pub fn pass() -> Self {
        Self::new(1.0)
    }

    pub fn fail() -> Self {
        Self::new(0.0)
    }

    pub fn with_precision_recall(mut self, precision: f64, recall: f64) -> Self {
        self.precision = Some(precision);
        self.recall = Some(recall);
        self
    }
}

/// Why an example was left out of the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The example lists no acceptable answers at all
    EmptyAnswerSet,

    /// The example's only answers are "no answer" markers
    NoAnswer,

    /// An answer could not be read as text (raw JSON attached)
    MalformedAnswer(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyAnswerSet => write!(f, "no acceptable answers"),
            SkipReason::NoAnswer => write!(f, "only null answers"),
            SkipReason::MalformedAnswer(raw) => write!(f, "malformed answer {raw}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Scored(MetricResult),
    Skipped(SkipReason),
}

/// Reject answer sets that cannot be compared as text.
pub(crate) fn check_answer_set(answers: &AnswerSet) -> Result<(), SkipReason> {
    if answers.is_empty() {
        return Err(SkipReason::EmptyAnswerSet);
    }
    if let Some(raw) = answers.first_malformed() {
        return Err(SkipReason::MalformedAnswer(raw.to_string()));
    }
    Ok(())
}

/// Averages over the scored examples of one metric run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub metric: String,

    /// Examples that received a score
    pub scored: usize,

    /// Examples left out, see SkipReason
    pub skipped: usize,

    /// Mean score over scored examples (0 when none were scored)
    pub score: f64,

    pub precision: Option<f64>,
    pub recall: Option<f64>,

    /// Indices of examples with a perfect score
    pub perfect: Vec<usize>,
}

impl Summary {
    pub fn from_outcomes(metric: &str, outcomes: &[Outcome]) -> Self {
        let results: Vec<&MetricResult> = outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Scored(r) => Some(r),
                Outcome::Skipped(_) => None,
            })
            .collect();

        let perfect = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| matches!(o, Outcome::Scored(r) if r.score >= 1.0))
            .map(|(i, _)| i)
            .collect();

        Self {
            metric: metric.to_string(),
            scored: results.len(),
            skipped: outcomes.len() - results.len(),
            score: mean(results.iter().map(|r| r.score)).unwrap_or(0.0),
            precision: mean(results.iter().filter_map(|r| r.precision)),
            recall: mean(results.iter().filter_map(|r| r.recall)),
            perfect,
        }
    }
}

/// Score every example with `metric`, logging each skip.
pub fn score_all<M: Metric>(metric: &M, predictions: &[String], answers: &[AnswerSet]) -> Vec<Outcome> {
    predictions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (prediction, set))| {
            let outcome = metric.evaluate(prediction, set);
            if let Outcome::Skipped(reason) = &outcome {
                tracing::debug!("{}: skipping example {}: {}", metric.name(), i, reason);
            }
            outcome
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
