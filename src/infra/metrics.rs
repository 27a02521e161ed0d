// ============================================================
// Layer 6 — Results Logger
// ============================================================
// Records evaluation results to a CSV file, one row per metric
// per run. Rows are appended, so repeated runs build up a table.
//
// Example CSV output:
//   name,metric,predictions,ground_truth,examples,scored,skipped,score,precision,recall
//   sft-1000,exact_match,preds.txt,nq/test.json,3000,3000,0,0.412333,,
//   sft-1000,f1,preds.txt,nq/test.json,3000,3000,0,0.503118,0.521004,0.547736
//
// Empty precision/recall cells mean the metric has none.
// The header comes from ResultRow's field names and is only
// written when the file is new or empty.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

use crate::application::evaluate_use_case::{EvalReport, EvaluateConfig, MetricReport};

/// One row of the results CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub name:         String,
    pub metric:       String,
    pub predictions:  String,
    pub ground_truth: String,
    pub examples:     usize,
    pub scored:       usize,
    pub skipped:      usize,
    pub score:        f64,
    pub precision:    Option<f64>,
    pub recall:       Option<f64>,
}

impl ResultRow {
    pub fn new(config: &EvaluateConfig, report: &MetricReport) -> Self {
        let s = &report.summary;
        Self {
            name:         config.name.clone(),
            metric:       s.metric.clone(),
            predictions:  config.predictions.clone(),
            ground_truth: config.ground_truth.clone(),
            examples:     report.examples,
            scored:       s.scored,
            skipped:      s.skipped,
            score:        s.score,
            precision:    s.precision,
            recall:       s.recall,
        }
    }
}

/// Appends result rows to a CSV file.
pub struct ResultsLog {
    csv_path: PathBuf,
}

impl ResultsLog {
    /// Prepare the CSV location, creating parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = path.into();

        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;
        }

        Ok(Self { csv_path })
    }

    /// Append rows, writing the header first if the file is new.
    pub fn log_rows(&self, rows: &[ResultRow]) -> Result<()> {
        let is_new = fs::metadata(&self.csv_path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);

        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Cannot write row to '{}'", self.csv_path.display()))?;
            tracing::debug!("Logged {} = {:.4} to '{}'", row.metric, row.score, self.csv_path.display());
        }

        writer
            .flush()
            .with_context(|| format!("Cannot flush '{}'", self.csv_path.display()))?;
        Ok(())
    }

    pub fn log(&self, row: &ResultRow) -> Result<()> {
        self.log_rows(std::slice::from_ref(row))
    }

    /// Log one row for every metric in the report.
    pub fn log_report(&self, report: &EvalReport) -> Result<()> {
        let rows: Vec<ResultRow> = report
            .metric_reports()
            .map(|m| ResultRow::new(&report.config, m))
            .collect();
        self.log_rows(&rows)
    }
}
