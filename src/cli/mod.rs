// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands the work to Layer 2 and
// prints the scores. No scoring happens here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvalArgs};

use crate::application::evaluate_use_case::{EvalReport, EvaluateConfig, EvaluateUseCase, MetricReport, Mode};

#[derive(Parser, Debug)]
#[command(
    name = "qa-eval",
    version,
    about = "Score QA predictions against ground-truth answers with Exact Match and token F1."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let (mode, args) = self.command.into_parts();
        run_eval(mode, args)
    }
}

fn run_eval(mode: Mode, args: EvalArgs) -> Result<()> {
    let config = EvaluateConfig { mode, ..args.into() };

    tracing::info!("Predictions:  {}", config.predictions);
    tracing::info!("Ground truth: {}", config.ground_truth);

    let report = EvaluateUseCase::new(config).execute()?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &EvalReport) {
    if let Some(f1) = &report.f1 {
        print_counts(f1);
        let s = &f1.summary;
        println!(
            "Method: {}; Precision: {:.2}%; Recall: {:.2}%; F1: {:.2}%",
            report.config.name,
            percent(s.precision),
            percent(s.recall),
            s.score * 100.0,
        );
    }

    if let Some(em) = &report.exact_match {
        print_counts(em);
        println!("Exact Match: {:.2}%", em.summary.score * 100.0);
    }

    if let Some(c) = report.mean_confidence {
        println!("Mean confidence: {c:.4}");
    }
}

fn print_counts(m: &MetricReport) {
    let s = &m.summary;
    if s.skipped > 0 {
        println!("len of valid answers: {} ({} skipped)", s.scored, s.skipped);
    } else {
        println!("len of valid answers: {}", s.scored);
    }
}

fn percent(v: Option<f64>) -> f64 {
    v.unwrap_or(0.0) * 100.0
}
