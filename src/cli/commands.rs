// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands share one set of flags:
//   em   — exact match only
//   f1   — precision / recall / F1 only
//   all  — both
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::evaluate_use_case::{EvaluateConfig, Mode};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exact Match of predictions against any acceptable answer
    Em(EvalArgs),

    /// Token-overlap precision, recall and F1 (best over answers)
    F1(EvalArgs),

    /// Both Exact Match and F1
    All(EvalArgs),
}

impl Commands {
    /// Split into the metric selection and its arguments
    pub fn into_parts(self) -> (Mode, EvalArgs) {
        match self {
            Commands::Em(args)  => (Mode::ExactMatch, args),
            Commands::F1(args)  => (Mode::F1, args),
            Commands::All(args) => (Mode::All, args),
        }
    }
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Prediction file, one answer per line.
    /// Files ending in "withprob.txt" carry a trailing confidence per line.
    #[arg(long, short)]
    pub predictions: String,

    /// Ground-truth file: JSON array, or JSON lines for .jsonl/.txt/.lst
    #[arg(long, short)]
    pub ground_truth: String,

    /// Label printed with the scores and written to the CSV log
    #[arg(long, default_value = "default")]
    pub name: String,

    /// Only score the first N examples of each file
    #[arg(long)]
    pub limit: Option<usize>,

    /// Append one result row per metric to this CSV file
    #[arg(long)]
    pub csv: Option<String>,

    /// Write the full report (with per-example outcomes) as JSON
    #[arg(long)]
    pub json: Option<String>,
}

/// The application layer never sees clap types.
impl From<EvalArgs> for EvaluateConfig {
    fn from(a: EvalArgs) -> Self {
        EvaluateConfig {
            predictions:  a.predictions,
            ground_truth: a.ground_truth,
            name:         a.name,
            limit:        a.limit,
            csv_path:     a.csv,
            json_path:    a.json,
            ..EvaluateConfig::default()
        }
    }
}
