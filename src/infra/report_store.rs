// ============================================================
// Layer 6 — Report Store
// ============================================================
// Writes the full EvalReport as pretty-printed JSON: the
// configuration used, per-metric summaries, and one outcome
// per example (score or skip reason).

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::evaluate_use_case::EvalReport;

pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, report: &EvalReport) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write report to '{}'", self.path.display()))?;

        tracing::info!("Saved report to '{}'", self.path.display());
        Ok(())
    }
}
