// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to run one evaluation:
// load both files, align them, score them, persist results.
//
// Rules for this layer:
//   - No normalization or scoring math here (Layer 4/5)
//   - No printing here (Layer 1)
//   - Only workflow coordination

// The evaluation workflow
pub mod evaluate_use_case;
