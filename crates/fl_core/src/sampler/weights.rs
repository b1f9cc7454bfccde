//! Draw weights: projection tiers × ownership chalk bias.
//!
//! All weight computation happens once, deterministically, before the
//! first RNG draw. The only randomness in a run flows through the single
//! ChaCha stream owned by the engine; this module just consumes it for
//! cumulative-weight picks.

use rand::Rng;

use crate::models::pool::PlayerPool;
use crate::sampler::config::SamplerConfig;

/// Floor applied to ownership before exponentiation so zero-ownership
/// players keep a nonzero draw probability at any alpha.
pub const OWNERSHIP_FLOOR: f64 = 0.01;

/// Per-player draw weight, indexed by pool index.
///
/// Tier assignment: players are ranked by projection (descending, id
/// ascending as tie-break) and split into `tier_weights.len()` equal-size
/// rank buckets; bucket k gets multiplier `tier_weights[k]`. On top of
/// that, `ownership^alpha` biases toward chalk.
pub fn build_draw_weights(pool: &PlayerPool, config: &SamplerConfig) -> Vec<f64> {
    let n = pool.len();
    let tiers = config.tier_weights.len();

    let mut ranked: Vec<usize> = (0..n).collect();
    ranked.sort_by(|&a, &b| {
        let pa = pool.by_index(a);
        let pb = pool.by_index(b);
        pb.projection
            .partial_cmp(&pa.projection)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| pa.id.cmp(&pb.id))
    });

    let mut weights = vec![0.0f64; n];
    for (rank, &idx) in ranked.iter().enumerate() {
        let tier = (rank * tiers) / n.max(1);
        let tier = tier.min(tiers - 1);
        let player = pool.by_index(idx);
        let ownership = player.ownership.clamp(0.0, 1.0).max(OWNERSHIP_FLOOR);
        weights[idx] = config.tier_weights[tier] * ownership.powf(config.ownership_alpha);
    }
    weights
}

/// Weighted draw over `candidates` (pool indices). Returns the chosen pool
/// index, or `None` when the candidate list is empty.
///
/// Walks the cumulative weight in candidate order; candidate order is
/// ascending pool index everywhere it is built, so the draw is fully
/// reproducible for a given RNG state.
pub fn weighted_pick(rng: &mut impl Rng, candidates: &[usize], weights: &[f64]) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let total: f64 = candidates.iter().map(|&i| weights[i]).sum();
    if total <= 0.0 {
        // Degenerate weights; fall back to a uniform draw rather than bias
        // toward the first candidate.
        return Some(candidates[rng.gen_range(0..candidates.len())]);
    }
    let mut target = rng.gen::<f64>() * total;
    for &idx in candidates {
        target -= weights[idx];
        if target <= 0.0 {
            return Some(idx);
        }
    }
    // Floating point residue: the walk can exit without crossing zero.
    candidates.last().copied()
}
