//! # Metrics Module
//!
//! Batch statistics over accepted lineups plus the rejection tally
//! gathered during sampling.
//!
//! - `exposure` - per-player / per-team exposure
//! - `overlap` - pairwise Jaccard summary
//! - `concentration` - Herfindahl-Hirschman Index

pub mod concentration;
pub mod exposure;
pub mod overlap;

pub use concentration::herfindahl_index;
pub use exposure::{player_exposure, team_exposure};
pub use overlap::{pairwise_overlap, OverlapSummary};

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::lineup::Lineup;
use crate::validate::ViolationCode;

// ============================================================================
// Rejection tally
// ============================================================================

/// Counters accumulated while the sampler loops. Duplicate and diversity
/// rejections are tracked apart from validator violations: a deduped
/// candidate was structurally *valid*, it just repeated an accepted set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RejectionTally {
    pub invalid_attempts: u64,
    pub invalid_by_reason: BTreeMap<ViolationCode, u64>,
    pub duplicate_rejections: u64,
    pub diversity_rejections: u64,
}

impl RejectionTally {
    pub fn record_invalid(&mut self, reasons: &[ViolationCode]) {
        self.invalid_attempts += 1;
        for reason in reasons {
            *self.invalid_by_reason.entry(*reason).or_insert(0) += 1;
        }
    }

    pub fn merge(&mut self, other: &RejectionTally) {
        self.invalid_attempts += other.invalid_attempts;
        for (reason, count) in &other.invalid_by_reason {
            *self.invalid_by_reason.entry(*reason).or_insert(0) += count;
        }
        self.duplicate_rejections += other.duplicate_rejections;
        self.diversity_rejections += other.diversity_rejections;
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// Final batch statistics. Pure aggregation over the accepted set plus the
/// tally; computing them has no side effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub requested: usize,
    pub accepted: usize,
    pub total_attempts: u64,
    pub invalid_attempts: u64,
    /// `invalid_attempts / total_attempts` (0 when no attempts were made).
    pub invalid_ratio: f64,
    pub invalid_by_reason: BTreeMap<ViolationCode, u64>,
    pub duplicate_rejections: u64,
    pub diversity_rejections: u64,
    pub player_exposure: BTreeMap<String, f64>,
    pub team_exposure: BTreeMap<String, f64>,
    pub overlap_mean: f64,
    pub overlap_max: f64,
    /// HHI over player exposure counts.
    pub hhi: f64,
    /// Fraction of lineups whose exact player set appears more than once
    /// in the batch. Always 0 when dedupe is on.
    pub duplication_rate: f64,
}

// ============================================================================
// Collector
// ============================================================================

/// Accumulates rejection counts during sampling, then folds them together
/// with the accepted batch into a [`Metrics`] record.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    requested: usize,
    tally: RejectionTally,
}

impl MetricsCollector {
    pub fn new(requested: usize) -> Self {
        MetricsCollector { requested, tally: RejectionTally::default() }
    }

    pub fn record_invalid(&mut self, reasons: &[ViolationCode]) {
        self.tally.record_invalid(reasons);
    }

    pub fn record_duplicate_rejection(&mut self) {
        self.tally.duplicate_rejections += 1;
    }

    pub fn record_diversity_rejection(&mut self) {
        self.tally.diversity_rejections += 1;
    }

    /// Fold another worker's tally in (sharded generation).
    pub fn absorb(&mut self, tally: &RejectionTally) {
        self.tally.merge(tally);
    }

    pub fn tally(&self) -> &RejectionTally {
        &self.tally
    }

    pub fn finalize(self, lineups: &[Lineup], total_attempts: u64) -> Metrics {
        let player_exposure = player_exposure(lineups);
        let team_exposure = team_exposure(lineups);
        let overlap = pairwise_overlap(lineups);

        let mut selection_counts: Vec<f64> = Vec::with_capacity(player_exposure.len());
        for lineup_fraction in player_exposure.values() {
            selection_counts.push(lineup_fraction * lineups.len() as f64);
        }
        let hhi = herfindahl_index(&selection_counts).unwrap_or(0.0);

        let mut key_counts: FxHashMap<u64, u64> = FxHashMap::default();
        for lineup in lineups {
            *key_counts.entry(lineup.key()).or_insert(0) += 1;
        }
        let duplicated: u64 = key_counts.values().filter(|&&c| c > 1).sum();
        let duplication_rate =
            if lineups.is_empty() { 0.0 } else { duplicated as f64 / lineups.len() as f64 };

        let invalid_ratio = if total_attempts == 0 {
            0.0
        } else {
            self.tally.invalid_attempts as f64 / total_attempts as f64
        };

        Metrics {
            requested: self.requested,
            accepted: lineups.len(),
            total_attempts,
            invalid_attempts: self.tally.invalid_attempts,
            invalid_ratio,
            invalid_by_reason: self.tally.invalid_by_reason,
            duplicate_rejections: self.tally.duplicate_rejections,
            diversity_rejections: self.tally.diversity_rejections,
            player_exposure,
            team_exposure,
            overlap_mean: overlap.mean,
            overlap_max: overlap.max,
            hhi,
            duplication_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;

    fn lineup(ids: &[&str]) -> Lineup {
        Lineup {
            slot_assignment: ids.iter().map(|s| s.to_string()).collect(),
            salary_total: 0,
            team_counts: Map::new(),
        }
    }

    #[test]
    fn test_tally_records_each_reason() {
        let mut tally = RejectionTally::default();
        tally.record_invalid(&[ViolationCode::SalaryCapExceeded, ViolationCode::TeamLimitExceeded]);
        tally.record_invalid(&[ViolationCode::SalaryCapExceeded]);
        assert_eq!(tally.invalid_attempts, 2);
        assert_eq!(tally.invalid_by_reason[&ViolationCode::SalaryCapExceeded], 2);
        assert_eq!(tally.invalid_by_reason[&ViolationCode::TeamLimitExceeded], 1);
    }

    #[test]
    fn test_tally_merge() {
        let mut a = RejectionTally::default();
        a.record_invalid(&[ViolationCode::SlotEligibilityFail]);
        a.duplicate_rejections = 2;
        let mut b = RejectionTally::default();
        b.record_invalid(&[ViolationCode::SlotEligibilityFail]);
        b.diversity_rejections = 1;
        a.merge(&b);
        assert_eq!(a.invalid_attempts, 2);
        assert_eq!(a.invalid_by_reason[&ViolationCode::SlotEligibilityFail], 2);
        assert_eq!(a.duplicate_rejections, 2);
        assert_eq!(a.diversity_rejections, 1);
    }

    #[test]
    fn test_finalize_ratios_and_duplication() {
        let mut collector = MetricsCollector::new(3);
        collector.record_invalid(&[ViolationCode::SalaryCapExceeded]);
        let batch =
            vec![lineup(&["a", "b"]), lineup(&["b", "a"]), lineup(&["c", "d"])];
        let metrics = collector.finalize(&batch, 4);
        assert_eq!(metrics.accepted, 3);
        assert_eq!(metrics.invalid_attempts, 1);
        assert!((metrics.invalid_ratio - 0.25).abs() < 1e-12);
        // Two of three lineups share the same player set.
        assert!((metrics.duplication_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.overlap_max, 1.0);
    }

    #[test]
    fn test_finalize_empty_batch() {
        let metrics = MetricsCollector::new(5).finalize(&[], 0);
        assert_eq!(metrics.accepted, 0);
        assert_eq!(metrics.invalid_ratio, 0.0);
        assert_eq!(metrics.hhi, 0.0);
        assert_eq!(metrics.duplication_rate, 0.0);
    }
}
