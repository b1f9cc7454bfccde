//! Pairwise lineup overlap statistics.

use crate::models::lineup::Lineup;

/// Summary of pairwise Jaccard similarity across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapSummary {
    pub mean: f64,
    pub max: f64,
}

/// Mean and max Jaccard similarity over all lineup pairs.
///
/// Quadratic in batch size; intended for the batch sizes this engine
/// produces (thousands, not millions).
pub fn pairwise_overlap(lineups: &[Lineup]) -> OverlapSummary {
    if lineups.len() < 2 {
        return OverlapSummary::default();
    }
    let mut sum = 0.0;
    let mut max = 0.0f64;
    let mut pairs = 0u64;
    for i in 0..lineups.len() {
        for j in (i + 1)..lineups.len() {
            let similarity = lineups[i].jaccard(&lineups[j]);
            sum += similarity;
            max = max.max(similarity);
            pairs += 1;
        }
    }
    OverlapSummary { mean: sum / pairs as f64, max }
}
