// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the files on disk and the scorer:
//
//   prediction file            ground-truth file
//       │                            │
//       ▼                            ▼
//   prediction_loader          ground_truth_loader
//       │                            │
//       └──────────► aligner ◄───────┘
//                       │
//                       ▼
//                   normalizer  (used by the scoring layer)

/// Reads plain and with-probability prediction files
pub mod prediction_loader;

/// Reads JSON / JSON-lines ground-truth files
pub mod ground_truth_loader;

/// Limits and length-aligns the two lists
pub mod aligner;

/// Canonicalizes answers before comparison
pub mod normalizer;
