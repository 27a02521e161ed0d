// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// One generated answer per example, read in file order.
// Predictions coming from a "withprob" file also carry the
// model's confidence for that answer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The generated answer text, trimmed of surrounding whitespace
    pub text: String,

    /// Confidence reported alongside the answer, if the file had one
    pub confidence: Option<f64>,
}

impl Prediction {
    /// A prediction read from a plain one-answer-per-line file.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), confidence: None }
    }

    /// A prediction read from a with-probability file.
    pub fn with_confidence(text: impl Into<String>, confidence: f64) -> Self {
        Self { text: text.into(), confidence: Some(confidence) }
    }
}

/// Mean confidence over the predictions that carry one.
/// Returns None when no prediction has a confidence.
pub fn mean_confidence(predictions: &[Prediction]) -> Option<f64> {
    let values: Vec<f64> = predictions.iter().filter_map(|p| p.confidence).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
