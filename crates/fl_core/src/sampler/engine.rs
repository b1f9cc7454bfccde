//! Rejection-sampling engine: seeded, weighted candidate generation with
//! the shared validator as the accept/reject gate.
//!
//! ## Determinism
//!
//! One `ChaCha8Rng` stream seeded from `config.seed` is the only source of
//! randomness in a run. Everything else that could perturb output order -
//! tier partitioning, slot ordering, eligibility lists, map iteration - is
//! computed deterministically before the first draw or kept in ordered
//! containers. For fixed `(pool, rules, config)` the output sequence and
//! metrics are bit-identical across runs and platforms.
//!
//! ## Loop shape
//!
//! The retry loop is a bounded state machine over
//! `{Sampling, Filled, Exhausted}` with an explicit attempt counter, so
//! budget exhaustion is a first-class transition instead of an implicit
//! loop-forever risk. Per-candidate rule violations are ordinary retries,
//! tallied and never surfaced as errors.

use std::hash::{Hash, Hasher};

use fxhash::{FxHashSet, FxHasher};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::metrics::{Metrics, MetricsCollector, RejectionTally};
use crate::error::ConfigError;
use crate::models::lineup::Lineup;
use crate::models::player::Player;
use crate::models::pool::PlayerPool;
use crate::models::rules::Rules;
use crate::sampler::config::SamplerConfig;
use crate::sampler::weights::{build_draw_weights, weighted_pick};
use crate::validate::{validate, SalaryTracker, TeamTracker, ViolationCode};

// ============================================================================
// Outcome
// ============================================================================

/// Terminal state of a `generate` run. `Partial` is not an error: the
/// caller decides whether a shortfall is fatal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleOutcome {
    Complete,
    Partial { collected: usize, attempts: u64 },
}

/// Accepted lineups plus batch metrics and the terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleBatch {
    pub lineups: Vec<Lineup>,
    pub metrics: Metrics,
    pub outcome: SampleOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SamplerState {
    Sampling,
    Filled,
    Exhausted,
}

/// Raw output of one sampling loop, before metrics are finalized. Workers
/// in the sharded path each produce one of these.
struct ShardOutput {
    lineups: Vec<Lineup>,
    tally: RejectionTally,
    attempts: u64,
}

// ============================================================================
// Engine
// ============================================================================

pub struct SamplerEngine<'a> {
    pool: &'a PlayerPool,
    rules: &'a Rules,
    config: SamplerConfig,
    rng: ChaCha8Rng,
    /// Original seed kept for diagnostics.
    original_seed: u64,
    /// Slot indices, most constrained first.
    slot_order: Vec<usize>,
    /// Per slot: pool indices whose position set intersects the slot
    /// requirement and whose roster status passes the active/injury gate.
    /// Ascending pool index, fixed before the first draw.
    slot_eligible: Vec<Vec<usize>>,
    /// Per pool index: tier × chalk draw weight.
    draw_weights: Vec<f64>,
}

impl<'a> SamplerEngine<'a> {
    /// Validate the configuration and precompute the deterministic draw
    /// context. Fails fast before any RNG state exists.
    pub fn new(
        pool: &'a PlayerPool,
        rules: &'a Rules,
        config: SamplerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate(pool, rules)?;

        let slot_order = rules.slot_order();
        let slot_eligible = rules
            .roster_slots
            .iter()
            .map(|spec| {
                (0..pool.len())
                    .filter(|&idx| {
                        let player = pool.by_index(idx);
                        spec.accepts(player.positions) && roster_status_ok(player, rules)
                    })
                    .collect()
            })
            .collect();
        let draw_weights = build_draw_weights(pool, &config);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let original_seed = config.seed;

        Ok(SamplerEngine {
            pool,
            rules,
            config,
            rng,
            original_seed,
            slot_order,
            slot_eligible,
            draw_weights,
        })
    }

    /// Run the sampling loop to completion and finalize metrics.
    pub fn generate(mut self) -> SampleBatch {
        let shard = self.run();
        let outcome = if shard.lineups.len() >= self.config.field_size {
            SampleOutcome::Complete
        } else {
            SampleOutcome::Partial { collected: shard.lineups.len(), attempts: shard.attempts }
        };

        let mut collector = MetricsCollector::new(self.config.field_size);
        collector.absorb(&shard.tally);
        let metrics = collector.finalize(&shard.lineups, shard.attempts);
        SampleBatch { lineups: shard.lineups, metrics, outcome }
    }

    fn run(&mut self) -> ShardOutput {
        let budget = self.config.field_size as u64 * self.config.max_attempts_multiplier;
        let mut tally = RejectionTally::default();
        let mut lineups: Vec<Lineup> = Vec::with_capacity(self.config.field_size);
        let mut seen_keys: FxHashSet<u64> = FxHashSet::default();
        let mut attempts: u64 = 0;
        let mut state = SamplerState::Sampling;

        while state == SamplerState::Sampling {
            if lineups.len() >= self.config.field_size {
                state = SamplerState::Filled;
                break;
            }
            if attempts >= budget {
                state = SamplerState::Exhausted;
                break;
            }
            attempts += 1;

            // A dead-ended draw (some slot had no remaining eligible
            // player) never reaches the validator; it is tallied under the
            // same code the validator would use for the completed set.
            let Some(assignment) = self.draw_candidate() else {
                tally.record_invalid(&[ViolationCode::SlotEligibilityFail]);
                continue;
            };

            let ids: Vec<String> =
                assignment.iter().map(|&idx| self.pool.by_index(idx).id.clone()).collect();
            let verdict = validate(&ids, self.pool, self.rules);
            if !verdict.valid {
                tally.record_invalid(&verdict.reasons);
                continue;
            }

            let lineup = Lineup::from_assignment(&assignment, self.pool);
            let key = lineup.key();
            if self.config.dedupe && seen_keys.contains(&key) {
                tally.duplicate_rejections += 1;
                continue;
            }
            if let Some(target) = self.config.diversity_target {
                if lineups.iter().any(|accepted| accepted.jaccard(&lineup) > target) {
                    tally.diversity_rejections += 1;
                    continue;
                }
            }

            seen_keys.insert(key);
            lineups.push(lineup);
            debug!(accepted = lineups.len(), attempts, "lineup accepted");
        }

        if state == SamplerState::Exhausted {
            warn!(
                seed = self.original_seed,
                collected = lineups.len(),
                requested = self.config.field_size,
                attempts,
                "attempt budget exhausted before the batch filled"
            );
        }

        ShardOutput { lineups, tally, attempts }
    }

    /// Draw one candidate: iterate slots most-constrained-first, pick a
    /// weighted player from the slot's remaining eligible subset, pruning
    /// by salary and team limit incrementally. Returns pool indices in
    /// slot order, or `None` on a dead end.
    fn draw_candidate(&mut self) -> Option<Vec<usize>> {
        let slot_count = self.rules.roster_slots.len();
        let mut used = vec![false; self.pool.len()];
        let mut salary = SalaryTracker::new(self.rules.salary_cap);
        let mut teams = TeamTracker::new(self.rules.max_per_team);
        let mut picks: Vec<Option<usize>> = vec![None; slot_count];
        let mut eligible: Vec<usize> = Vec::with_capacity(self.pool.len());

        for &slot_idx in &self.slot_order {
            eligible.clear();
            for &idx in &self.slot_eligible[slot_idx] {
                if used[idx] {
                    continue;
                }
                let player = self.pool.by_index(idx);
                if !salary.fits(player.salary) || !teams.fits(&player.team) {
                    continue;
                }
                eligible.push(idx);
            }

            let pick = weighted_pick(&mut self.rng, &eligible, &self.draw_weights)?;
            let player = self.pool.by_index(pick);
            // The eligibility filter above makes these infallible.
            salary.try_add(player.salary).ok()?;
            teams.try_add(&player.team).ok()?;
            used[pick] = true;
            picks[slot_idx] = Some(pick);
        }

        let assignment: Vec<usize> = picks.into_iter().flatten().collect();
        (assignment.len() == slot_count).then_some(assignment)
    }
}

fn roster_status_ok(player: &Player, rules: &Rules) -> bool {
    if !rules.require_active {
        return true;
    }
    if !player.active {
        return false;
    }
    match player.injury_status {
        Some(status) => !rules.blocked_injury_statuses.contains(&status),
        None => true,
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Sequential generation: the reference single-stream path.
pub fn generate(
    pool: &PlayerPool,
    rules: &Rules,
    config: SamplerConfig,
) -> Result<SampleBatch, ConfigError> {
    Ok(SamplerEngine::new(pool, rules, config)?.generate())
}

/// Sharded generation: partitions the requested count and attempt budget
/// across `workers`, gives each worker its own deterministically derived
/// sub-seed and RNG stream, and merges results in worker-index order.
/// Dedupe and the diversity cap are re-applied globally during the merge,
/// so the sharded path never emits a batch the sequential invariants would
/// reject. Output is reproducible for fixed inputs and worker count.
pub fn generate_sharded(
    pool: &PlayerPool,
    rules: &Rules,
    config: SamplerConfig,
    workers: usize,
) -> Result<SampleBatch, ConfigError> {
    config.validate(pool, rules)?;
    if workers <= 1 {
        return generate(pool, rules, config);
    }

    // Spread the requested count across workers; early workers absorb the
    // remainder so quotas are fixed by index, not by scheduling.
    let workers = workers.min(config.field_size);
    let base = config.field_size / workers;
    let remainder = config.field_size % workers;

    let shards: Result<Vec<ShardOutput>, ConfigError> = (0..workers)
        .into_par_iter()
        .map(|worker| {
            let quota = base + usize::from(worker < remainder);
            let mut shard_config = config.clone();
            shard_config.field_size = quota;
            shard_config.seed = mix_seed(config.seed, worker as u64);
            let mut engine = SamplerEngine::new(pool, rules, shard_config)?;
            Ok(engine.run())
        })
        .collect();
    let shards = shards?;

    // Merge in worker-index order; local acceptance order is preserved
    // within each shard.
    let mut collector = MetricsCollector::new(config.field_size);
    let mut lineups: Vec<Lineup> = Vec::with_capacity(config.field_size);
    let mut seen_keys: FxHashSet<u64> = FxHashSet::default();
    let mut attempts: u64 = 0;
    for shard in shards {
        attempts += shard.attempts;
        collector.absorb(&shard.tally);
        for lineup in shard.lineups {
            if lineups.len() >= config.field_size {
                break;
            }
            if config.dedupe && seen_keys.contains(&lineup.key()) {
                collector.record_duplicate_rejection();
                continue;
            }
            if let Some(target) = config.diversity_target {
                if lineups.iter().any(|accepted| accepted.jaccard(&lineup) > target) {
                    collector.record_diversity_rejection();
                    continue;
                }
            }
            seen_keys.insert(lineup.key());
            lineups.push(lineup);
        }
    }

    let outcome = if lineups.len() >= config.field_size {
        SampleOutcome::Complete
    } else {
        SampleOutcome::Partial { collected: lineups.len(), attempts }
    };
    let metrics = collector.finalize(&lineups, attempts);
    Ok(SampleBatch { lineups, metrics, outcome })
}

/// Derive a worker sub-seed. FxHasher, not DefaultHasher: the mix must be
/// stable across rustc versions for replayable runs.
pub(crate) fn mix_seed(seed: u64, lane: u64) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    lane.hash(&mut hasher);
    hasher.finish()
}
