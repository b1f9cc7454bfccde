//! Sampling run configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::pool::PlayerPool;
use crate::models::rules::Rules;

/// Configuration for one `generate` run. The seed is mandatory: there is
/// no implicit entropy source anywhere in the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplerConfig {
    /// Requested number of accepted lineups.
    #[serde(alias = "n")]
    pub field_size: usize,

    pub seed: u64,

    /// Chalk-bias exponent: draw weight scales with `ownership^alpha`.
    /// 0 disables the ownership bias entirely.
    #[serde(default = "default_ownership_alpha")]
    pub ownership_alpha: f64,

    /// Maximum allowed Jaccard similarity between a new lineup and any
    /// already-accepted lineup. `None` disables the diversity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity_target: Option<f64>,

    /// Attempt budget is `field_size * max_attempts_multiplier`.
    #[serde(default = "default_max_attempts_multiplier")]
    pub max_attempts_multiplier: u64,

    /// Reject exact player-set duplicates of already-accepted lineups.
    #[serde(default = "default_dedupe")]
    pub dedupe: bool,

    /// Draw-weight multiplier per projection tier, best tier first. The
    /// tier count is the vector length; boundaries are equal-size rank
    /// buckets over the projection-sorted pool.
    #[serde(default = "default_tier_weights")]
    pub tier_weights: Vec<f64>,
}

fn default_ownership_alpha() -> f64 {
    1.0
}

fn default_max_attempts_multiplier() -> u64 {
    1_000
}

fn default_dedupe() -> bool {
    true
}

fn default_tier_weights() -> Vec<f64> {
    vec![1.5, 1.0, 0.7]
}

impl SamplerConfig {
    pub fn new(field_size: usize, seed: u64) -> Self {
        SamplerConfig {
            field_size,
            seed,
            ownership_alpha: default_ownership_alpha(),
            diversity_target: None,
            max_attempts_multiplier: default_max_attempts_multiplier(),
            dedupe: default_dedupe(),
            tier_weights: default_tier_weights(),
        }
    }

    /// Fail fast on misconfiguration, before any RNG state exists.
    pub fn validate(&self, pool: &PlayerPool, rules: &Rules) -> Result<(), ConfigError> {
        rules.validate()?;
        if self.field_size == 0 {
            return Err(ConfigError::ZeroFieldSize);
        }
        if pool.len() < rules.slot_count() {
            return Err(ConfigError::PoolTooSmall { pool: pool.len(), slots: rules.slot_count() });
        }
        if !self.ownership_alpha.is_finite() || self.ownership_alpha < 0.0 {
            return Err(ConfigError::InvalidAlpha(self.ownership_alpha));
        }
        if let Some(target) = self.diversity_target {
            if !target.is_finite() || !(0.0..=1.0).contains(&target) {
                return Err(ConfigError::InvalidDiversityTarget(target));
            }
        }
        if self.max_attempts_multiplier == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        if self.tier_weights.is_empty()
            || self.tier_weights.iter().any(|w| !w.is_finite() || *w <= 0.0)
        {
            return Err(ConfigError::InvalidTierWeights);
        }
        Ok(())
    }
}
