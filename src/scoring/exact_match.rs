// ============================================================
// Layer 5 — Exact Match
// ============================================================
// An example scores 1 when the normalized prediction equals
// the normalized form of any acceptable answer.
//
// Example:
//   prediction: "The Cat!"      → "cat"
//   answers:    ["a dog", "cat"] → ["dog", "cat"]   → match, 1

use crate::data::normalizer::Normalizer;
use crate::domain::answer::AnswerSet;
use crate::domain::traits::Metric;
use crate::scoring::{check_answer_set, MetricResult, Outcome, SkipReason};

pub struct ExactMatch<'n> {
    normalizer: &'n Normalizer,
}

impl<'n> ExactMatch<'n> {
    pub fn new(normalizer: &'n Normalizer) -> Self {
        Self { normalizer }
    }

    /// Normalized equality of one prediction and one answer.
    pub fn matches(&self, prediction: &str, ground_truth: &str) -> bool {
        let n = self.normalizer;
        n.normalize(&n.clean_prediction(prediction))
            == n.normalize(n.clean_ground_truth(ground_truth))
    }

    /// True if the prediction matches any of the answers.
    pub fn best_of<'a>(&self, prediction: &str, ground_truths: impl IntoIterator<Item = &'a str>) -> bool {
        ground_truths
            .into_iter()
            .any(|gt| self.matches(prediction, gt))
    }
}

impl Metric for ExactMatch<'_> {
    fn name(&self) -> &str {
        "exact_match"
    }

    fn evaluate(&self, prediction: &str, answers: &AnswerSet) -> Outcome {
        if let Err(reason) = check_answer_set(answers) {
            return Outcome::Skipped(reason);
        }
        if answers.texts().next().is_none() {
            return Outcome::Skipped(SkipReason::NoAnswer);
        }

        if self.best_of(prediction, answers.texts()) {
            Outcome::Scored(MetricResult::pass())
        } else {
            Outcome::Scored(MetricResult::fail())
        }
    }
}
