// ============================================================
// Layer 4 — Prediction Loader
// ============================================================
// Reads the model's answers from a text file.
//
// Two formats exist, told apart by the file name:
//
//   *withprob.txt   "Paris\t0.8731"   answer + trailing confidence
//   anything else   "Paris"           one answer per line
//
// Every line is one example, including empty lines: an empty
// line is an empty answer, and dropping it would shift every
// later prediction onto the wrong ground truth.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{bail, Context, Result};
use std::{fs, path::Path};

use crate::domain::prediction::Prediction;
use crate::domain::traits::PredictionSource;

/// File name suffix that marks the with-probability format
pub const WITH_PROB_SUFFIX: &str = "withprob.txt";

/// One answer per line.
pub struct PlainPredictions {
    path: String,
}

impl PlainPredictions {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PredictionSource for PlainPredictions {
    fn load_all(&self) -> Result<Vec<Prediction>> {
        let text = read_file(&self.path)?;
        let predictions: Vec<Prediction> = text
            .lines()
            .map(|line| Prediction::new(line.trim()))
            .collect();

        tracing::debug!("Loaded {} plain predictions from '{}'", predictions.len(), self.path);
        Ok(predictions)
    }
}

/// Answer followed by a numeric confidence on each line.
pub struct WithProbPredictions {
    path: String,
}

impl WithProbPredictions {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PredictionSource for WithProbPredictions {
    fn load_all(&self) -> Result<Vec<Prediction>> {
        let text = read_file(&self.path)?;
        let mut predictions = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let prediction = parse_with_prob_line(line)
                .with_context(|| format!("'{}' line {}", self.path, i + 1))?;
            predictions.push(prediction);
        }

        tracing::debug!(
            "Loaded {} predictions with confidence from '{}'",
            predictions.len(),
            self.path
        );
        Ok(predictions)
    }
}

/// Pick the loader matching the file name and read every prediction.
pub fn load_predictions(path: &str) -> Result<Vec<Prediction>> {
    let source: Box<dyn PredictionSource> = if path.ends_with(WITH_PROB_SUFFIX) {
        Box::new(WithProbPredictions::new(path))
    } else {
        Box::new(PlainPredictions::new(path))
    };
    source.load_all()
}

/// Split "answer<TAB>0.87" (or "answer 0.87" when there is no tab)
/// into its answer and confidence.
fn parse_with_prob_line(line: &str) -> Result<Prediction> {
    let line = line.trim_end();

    let split = line
        .rsplit_once('\t')
        .or_else(|| line.trim_start().rsplit_once(char::is_whitespace));

    let (answer, prob) = match split {
        Some(parts) => parts,
        // A lone token is only valid if it is the confidence of an empty answer
        None => ("", line.trim()),
    };

    let confidence: f64 = match prob.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("expected a trailing confidence value, found {:?}", prob.trim()),
    };

    Ok(Prediction::with_confidence(answer.trim(), confidence))
}

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path))
        .with_context(|| format!("Cannot read prediction file '{path}'"))
}
