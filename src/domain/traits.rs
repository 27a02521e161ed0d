// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer loads data and scores it only through
// these traits, so a new file format or a new metric is one
// more implementation rather than a change to the workflow.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::answer::AnswerSet;
use crate::domain::prediction::Prediction;
use crate::scoring::Outcome;

// ─── PredictionSource ─────────────────────────────────────────────────────────
/// Anything that can produce the ordered list of model answers.
///
/// Implementations:
///   - PlainPredictions    → one answer per line
///   - WithProbPredictions → answer plus trailing confidence per line
pub trait PredictionSource {
    fn load_all(&self) -> Result<Vec<Prediction>>;
}

// ─── GroundTruthSource ────────────────────────────────────────────────────────
/// Anything that can produce one AnswerSet per example, in order.
///
/// Implementations:
///   - GroundTruthFile in lenient mode (used for exact match)
///   - GroundTruthFile in strict mode  (used for F1)
pub trait GroundTruthSource {
    fn load_all(&self) -> Result<Vec<AnswerSet>>;
}

// ─── Metric ───────────────────────────────────────────────────────────────────
/// Scores one prediction against all acceptable answers for an example.
///
/// Implementations:
///   - ExactMatch → 1.0 if any normalized answer equals the prediction
///   - F1Score    → best token-overlap F1 over the answers
pub trait Metric {
    /// Short name used in logs, CSV rows and reports
    fn name(&self) -> &str;

    /// Score a single example, or explain why it was skipped.
    fn evaluate(&self, prediction: &str, answers: &AnswerSet) -> Outcome;
}
