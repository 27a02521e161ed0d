// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence for evaluation results:
//
//   metrics.rs      — Results CSV log
//                     Appends one row per metric per run, so a
//                     series of runs over different prediction
//                     files can be compared in a spreadsheet.
//
//   report_store.rs — JSON report
//                     Writes the full EvalReport, including
//                     per-example outcomes, for later analysis.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Results CSV logger
pub mod metrics;

/// JSON report writer
pub mod report_store;
