// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Runs the full evaluation pipeline in order:
//
//   Step 1: Load predictions             (Layer 4 - data)
//   Step 2: Load ground truths per metric (Layer 4 - data)
//            exact match → lenient loader
//            F1          → strict loader
//   Step 3: Apply limit, align lengths    (Layer 4 - data)
//   Step 4: Score every example           (Layer 5 - scoring)
//   Step 5: Append CSV row / write JSON   (Layer 6 - infra)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    aligner::{align_lengths, apply_limit},
    ground_truth_loader::{GroundTruthFile, LoadMode},
    normalizer::Normalizer,
    prediction_loader::load_predictions,
};
use crate::domain::prediction::{mean_confidence, Prediction};
use crate::domain::traits::{GroundTruthSource, Metric};
use crate::infra::{metrics::ResultsLog, report_store::ReportStore};
use crate::scoring::{exact_match::ExactMatch, f1::F1Score, score_all, Outcome, Summary};

// ─── Evaluation Configuration ─────────────────────────────────────────────────

/// Which metrics to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    ExactMatch,
    F1,
    All,
}

impl Mode {
    pub fn includes_exact_match(self) -> bool {
        matches!(self, Mode::ExactMatch | Mode::All)
    }

    pub fn includes_f1(self) -> bool {
        matches!(self, Mode::F1 | Mode::All)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateConfig {
    /// Prediction file (plain, or *withprob.txt)
    pub predictions:  String,
    /// Ground-truth file (JSON array, or JSON lines)
    pub ground_truth: String,
    /// Label printed with the scores and written to the CSV log
    pub name:         String,
    pub mode:         Mode,
    /// Only score the first N examples
    pub limit:        Option<usize>,
    /// Append one row per metric to this CSV file
    pub csv_path:     Option<String>,
    /// Write the full report as JSON to this file
    pub json_path:    Option<String>,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            predictions:  String::new(),
            ground_truth: String::new(),
            name:         "default".to_string(),
            mode:         Mode::All,
            limit:        None,
            csv_path:     None,
            json_path:    None,
        }
    }
}

// ─── Report ───────────────────────────────────────────────────────────────────

/// Results of one metric over the aligned examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Examples compared after limit and alignment
    pub examples:  usize,
    /// Ground truths loaded, after the limit but before alignment
    pub ground_truths: usize,
    /// Whether the two files had different lengths
    pub truncated: bool,
    pub summary:   Summary,
    /// One outcome per example, in file order
    pub outcomes:  Vec<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub config:          EvaluateConfig,
    pub predictions:     usize,
    /// Mean confidence, for with-probability prediction files
    pub mean_confidence: Option<f64>,
    pub exact_match:     Option<MetricReport>,
    pub f1:              Option<MetricReport>,
}

impl EvalReport {
    pub fn metric_reports(&self) -> impl Iterator<Item = &MetricReport> {
        self.exact_match.iter().chain(self.f1.iter())
    }
}

// ─── EvaluateUseCase ──────────────────────────────────────────────────────────

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<EvalReport> {
        let cfg = &self.config;
        let normalizer = Normalizer::new()?;

        // ── Step 1: Predictions ───────────────────────────────────────────────
        let mut predictions = load_predictions(&cfg.predictions)?;
        apply_limit(&mut predictions, cfg.limit);
        tracing::info!("Loaded {} predictions from '{}'", predictions.len(), cfg.predictions);

        // ── Steps 2–4: Score each requested metric ────────────────────────────
        let exact_match = if cfg.mode.includes_exact_match() {
            let source = GroundTruthFile::new(&cfg.ground_truth, LoadMode::Lenient);
            Some(self.run_metric(&ExactMatch::new(&normalizer), &source, &predictions)?)
        } else {
            None
        };

        let f1 = if cfg.mode.includes_f1() {
            let source = GroundTruthFile::new(&cfg.ground_truth, LoadMode::Strict);
            Some(self.run_metric(&F1Score::new(&normalizer), &source, &predictions)?)
        } else {
            None
        };

        let report = EvalReport {
            config: cfg.clone(),
            predictions: predictions.len(),
            mean_confidence: mean_confidence(&predictions),
            exact_match,
            f1,
        };

        warn_truncation(&report);

        // ── Step 5: Persist ───────────────────────────────────────────────────
        if let Some(path) = &cfg.csv_path {
            ResultsLog::new(path)?.log_report(&report)?;
        }
        if let Some(path) = &cfg.json_path {
            ReportStore::new(path).save(&report)?;
        }

        Ok(report)
    }

    fn run_metric<M: Metric, S: GroundTruthSource>(
        &self,
        metric:      &M,
        source:      &S,
        predictions: &[Prediction],
    ) -> Result<MetricReport> {
        let mut answers = source.load_all()?;
        apply_limit(&mut answers, self.config.limit);

        let ground_truths = answers.len();

        let mut texts: Vec<String> = predictions.iter().map(|p| p.text.clone()).collect();
        let truncated = align_lengths(&mut texts, &mut answers);

        let outcomes = score_all(metric, &texts, &answers);
        let summary = Summary::from_outcomes(metric.name(), &outcomes);

        if summary.skipped > 0 {
            tracing::warn!(
                "{}: skipped {} of {} examples with unusable ground truth",
                metric.name(),
                summary.skipped,
                texts.len()
            );
        }
        tracing::info!(
            "{}: {:.4} over {} scored examples",
            metric.name(),
            summary.score,
            summary.scored
        );

        Ok(MetricReport { examples: texts.len(), ground_truths, truncated, summary, outcomes })
    }
}

/// Log a length mismatch once, however many metrics saw it.
fn warn_truncation(report: &EvalReport) {
    if let Some(m) = report.metric_reports().find(|m| m.truncated) {
        tracing::warn!(
            "{} predictions but {} ground truths; scoring the first {}",
            report.predictions,
            m.ground_truths,
            m.examples
        );
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Fixture {
        dir:          tempfile::TempDir,
        predictions:  String,
        ground_truth: String,
    }

    fn fixture(pred_name: &str, predictions: &str, ground_truth: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pred_path = dir.path().join(pred_name);
        let gt_path = dir.path().join("test.json");
        fs::write(&pred_path, predictions).unwrap();
        fs::write(&gt_path, ground_truth).unwrap();
        Fixture {
            predictions:  pred_path.to_str().unwrap().to_string(),
            ground_truth: gt_path.to_str().unwrap().to_string(),
            dir,
        }
    }

    fn config(f: &Fixture, mode: Mode) -> EvaluateConfig {
        EvaluateConfig {
            predictions:  f.predictions.clone(),
            ground_truth: f.ground_truth.clone(),
            mode,
            ..EvaluateConfig::default()
        }
    }

    #[test]
    fn test_scores_both_metrics() {
        let f = fixture(
            "preds.txt",
            "Paris<|endoftext|>\nthe Tiber river\n",
            r#"[{"answers": ["Paris", "Paris, France"]}, {"answer": "Tiber"}]"#,
        );
        let report = EvaluateUseCase::new(config(&f, Mode::All)).execute().unwrap();

        let em = report.exact_match.unwrap();
        assert_eq!(em.examples, 2);
        assert_eq!(em.summary.score, 0.5);
        assert_eq!(em.summary.perfect, vec![0]);

        let f1 = report.f1.unwrap();
        // example 0: exact → 1.0; example 1: "tiber river" vs "tiber" → 2/3
        assert!((f1.summary.score - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-9);
        assert_eq!(f1.summary.precision, Some(0.75));
        assert_eq!(f1.summary.recall, Some(1.0));
    }

    #[test]
    fn test_length_mismatch_truncates() {
        let f = fixture(
            "preds.txt",
            "Paris\n",
            r#"[{"answer": "Paris"}, {"answer": "Rome"}, {"answer": "Oslo"}]"#,
        );
        let report = EvaluateUseCase::new(config(&f, Mode::ExactMatch)).execute().unwrap();
        let em = report.exact_match.unwrap();
        assert!(em.truncated);
        assert_eq!(em.examples, 1);
        assert_eq!(em.ground_truths, 3);
        assert_eq!(em.summary.score, 1.0);
        assert!(report.f1.is_none());
    }

    #[test]
    fn test_both_metrics_see_the_same_mismatch() {
        let f = fixture(
            "preds.txt",
            "Paris\nRome\n",
            r#"[{"answer": "Paris"}, {"answer": "Rome"}, {"answer": "Oslo"}]"#,
        );
        let report = EvaluateUseCase::new(config(&f, Mode::All)).execute().unwrap();
        let truncated: Vec<(usize, usize)> = report
            .metric_reports()
            .filter(|m| m.truncated)
            .map(|m| (m.examples, m.ground_truths))
            .collect();
        assert_eq!(truncated, vec![(2, 3), (2, 3)]);
        assert_eq!(report.predictions, 2);
    }

    #[test]
    fn test_limit_applies_to_both_files() {
        let f = fixture(
            "preds.txt",
            "Paris\nwrong\nwrong\n",
            r#"[{"answer": "Paris"}, {"answer": "Rome"}, {"answer": "Oslo"}]"#,
        );
        let cfg = EvaluateConfig { limit: Some(1), ..config(&f, Mode::ExactMatch) };
        let em = EvaluateUseCase::new(cfg).execute().unwrap().exact_match.unwrap();
        assert!(!em.truncated);
        assert_eq!(em.summary.score, 1.0);
    }

    #[test]
    fn test_strict_loader_failure_is_fatal_for_f1_only() {
        let f = fixture("preds.txt", "Paris\nRome\n", r#"[{"answer": "Paris"}, "Rome"]"#);
        assert!(EvaluateUseCase::new(config(&f, Mode::ExactMatch)).execute().is_ok());
        assert!(EvaluateUseCase::new(config(&f, Mode::F1)).execute().is_err());
    }

    #[test]
    fn test_with_prob_predictions_and_outputs() {
        let f = fixture(
            "run_withprob.txt",
            "Paris\t0.75\nRome\t0.25\n",
            r#"[{"answer": "Paris"}, {"answers": []}]"#,
        );
        let csv = f.dir.path().join("results.csv");
        let json = f.dir.path().join("out/report.json");
        let cfg = EvaluateConfig {
            name:      "run-a".to_string(),
            csv_path:  Some(csv.to_str().unwrap().to_string()),
            json_path: Some(json.to_str().unwrap().to_string()),
            ..config(&f, Mode::All)
        };
        let report = EvaluateUseCase::new(cfg).execute().unwrap();

        assert_eq!(report.mean_confidence, Some(0.5));
        // Lenient: empty list → skipped. Strict: empty list → null → skipped.
        assert_eq!(report.exact_match.as_ref().unwrap().summary.skipped, 1);
        assert_eq!(report.f1.as_ref().unwrap().summary.skipped, 1);

        let rows = fs::read_to_string(&csv).unwrap();
        assert_eq!(rows.lines().count(), 3);
        assert!(rows.lines().nth(1).unwrap().starts_with("run-a,exact_match,"));

        let saved: EvalReport = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(saved, report);
    }

    #[test]
    fn test_missing_prediction_file_is_an_error() {
        let f = fixture("preds.txt", "", "[]");
        let cfg = EvaluateConfig {
            predictions: f.dir.path().join("nope.txt").to_str().unwrap().to_string(),
            ..config(&f, Mode::All)
        };
        assert!(EvaluateUseCase::new(cfg).execute().is_err());
    }
}
