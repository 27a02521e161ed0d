// ============================================================
// Layer 5 — Token F1
// ============================================================
// Compares the bag of tokens in the normalized prediction with
// the bag of tokens in a normalized answer.
//
//   common    = size of the multiset intersection
//   precision = common / |prediction tokens|
//   recall    = common / |answer tokens|
//   f1        = 2 · precision · recall / (precision + recall)
//
// No common tokens (which includes either side being empty)
// scores 0 across the board. With several acceptable answers
// the one with the highest F1 wins, and its precision and
// recall are the ones reported.
//
// Reference: Rajpurkar et al. (2016) SQuAD evaluation script

use std::collections::HashMap;

use crate::data::normalizer::{tokens, Normalizer};
use crate::domain::answer::AnswerSet;
use crate::domain::traits::Metric;
use crate::scoring::{check_answer_set, MetricResult, Outcome, SkipReason};

pub struct F1Score<'n> {
    normalizer: &'n Normalizer,
}

impl<'n> F1Score<'n> {
    pub fn new(normalizer: &'n Normalizer) -> Self {
        Self { normalizer }
    }

    /// Precision, recall and F1 of one prediction against one answer.
    pub fn pair(&self, prediction: &str, ground_truth: &str) -> MetricResult {
        let n = self.normalizer;
        let pred = n.normalize(&n.clean_prediction(prediction));
        let gold = n.normalize(n.clean_ground_truth(ground_truth));
        prec_recall_f1(&tokens(&pred), &tokens(&gold))
    }

    /// The highest-F1 result over all answers, or None without answers.
    pub fn best_of<'a>(
        &self,
        prediction: &str,
        ground_truths: impl IntoIterator<Item = &'a str>,
    ) -> Option<MetricResult> {
        ground_truths
            .into_iter()
            .map(|gt| self.pair(prediction, gt))
            .fold(None, |best: Option<MetricResult>, r| match best {
                Some(b) if b.score >= r.score => Some(b),
                _ => Some(r),
            })
    }
}

impl Metric for F1Score<'_> {
    fn name(&self) -> &str {
        "f1"
    }

    fn evaluate(&self, prediction: &str, answers: &AnswerSet) -> Outcome {
        if let Err(reason) = check_answer_set(answers) {
            return Outcome::Skipped(reason);
        }
        match self.best_of(prediction, answers.texts()) {
            Some(result) => Outcome::Scored(result),
            None => Outcome::Skipped(SkipReason::NoAnswer),
        }
    }
}

/// Token-level precision / recall / F1 with multiset counting.
pub fn prec_recall_f1(pred_tokens: &[&str], gold_tokens: &[&str]) -> MetricResult {
    let mut gold_counts: HashMap<&str, usize> = HashMap::new();
    for t in gold_tokens {
        *gold_counts.entry(*t).or_insert(0) += 1;
    }

    let mut common = 0usize;
    for t in pred_tokens {
        if let Some(c) = gold_counts.get_mut(t) {
            if *c > 0 {
                *c -= 1;
                common += 1;
            }
        }
    }

    if common == 0 {
        return MetricResult::new(0.0).with_precision_recall(0.0, 0.0);
    }

    let precision = common as f64 / pred_tokens.len() as f64;
    let recall = common as f64 / gold_tokens.len() as f64;
    let f1 = 2.0 * precision * recall / (precision + recall);

    MetricResult::new(f1).with_precision_recall(precision, recall)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::Candidate;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_prediction_scores_one() {
        let n = Normalizer::new().unwrap();
        let f1 = F1Score::new(&n);
        let r = f1.pair("Paris, France", "Paris, France");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.precision, Some(1.0));
        assert_eq!(r.recall, Some(1.0));
    }

    #[test]
    fn test_disjoint_tokens_score_zero() {
        let n = Normalizer::new().unwrap();
        let f1 = F1Score::new(&n);
        let r = f1.best_of("blue whale", ["red fox", "green frog"]).unwrap();
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let n = Normalizer::new().unwrap();
        let f1 = F1Score::new(&n);
        // "paris" vs "paris france": p = 1, r = 0.5, f1 = 2/3
        let r = f1.pair("Paris", "Paris, France");
        assert!(close(r.score, 2.0 / 3.0));
        assert_eq!(r.precision, Some(1.0));
        assert_eq!(r.recall, Some(0.5));
    }

    #[test]
    fn test_multiset_intersection() {
        let r = prec_recall_f1(&["new", "new", "york"], &["new", "york"]);
        assert!(close(r.precision.unwrap(), 2.0 / 3.0));
        assert_eq!(r.recall, Some(1.0));
        assert!(close(r.score, 0.8));
    }

    #[test]
    fn test_empty_sides_score_zero() {
        assert_eq!(prec_recall_f1(&[], &["paris"]).score, 0.0);
        assert_eq!(prec_recall_f1(&["paris"], &[]).score, 0.0);
        assert_eq!(prec_recall_f1(&[], &[]).score, 0.0);
    }

    #[test]
    fn test_best_candidate_wins() {
        let n = Normalizer::new().unwrap();
        let f1 = F1Score::new(&n);
        let answers = AnswerSet::new(vec![
            Candidate::Text("London".into()),
            Candidate::Text("Paris".into()),
            Candidate::NoAnswer,
        ]);
        assert_eq!(f1.evaluate("paris", &answers), Outcome::Scored(f1.pair("paris", "Paris")));
    }

    #[test]
    fn test_only_null_answers_are_skipped() {
        let n = Normalizer::new().unwrap();
        let f1 = F1Score::new(&n);
        let answers = AnswerSet::new(vec![Candidate::NoAnswer]);
        assert_eq!(f1.evaluate("paris", &answers), Outcome::Skipped(SkipReason::NoAnswer));
    }
}
