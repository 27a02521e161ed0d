// ============================================================
// Layer 4 — Prediction / Ground-Truth Alignment
// ============================================================
// Predictions and ground truths are matched by position, so
// both lists must have the same length before scoring.
//
//   - An optional limit keeps only the first N of each
//   - A length mismatch truncates both to the shorter list;
//     it is never an error. The caller reports it once per run.

/// Keep only the first `limit` items, if a limit is set.
pub fn apply_limit<T>(items: &mut Vec<T>, limit: Option<usize>) {
    if let Some(n) = limit {
        items.truncate(n);
    }
}

/// Truncate both lists to the shorter length.
/// Returns true when anything was dropped.
pub fn align_lengths<P, G>(predictions: &mut Vec<P>, ground_truths: &mut Vec<G>) -> bool {
    let (np, ng) = (predictions.len(), ground_truths.len());
    if np == ng {
        return false;
    }

    let len = np.min(ng);
    predictions.truncate(len);
    ground_truths.truncate(len);
    true
}
