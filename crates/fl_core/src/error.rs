//! Error types for pool construction, run configuration and the JSON API.
//!
//! Per-candidate rule violations are NOT errors: they are `ViolationCode`
//! values carried in a `ValidationResult` and tallied by the sampler, since
//! rejection is the expected steady state of the sampling loop. The enums
//! here cover the cases that must stop a run before any sampling happens.

use thiserror::Error;

/// Errors raised while building a [`crate::models::pool::PlayerPool`].
///
/// Construction is the only place pool-shape problems can appear; once a
/// pool exists it is immutable for the duration of a run.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("duplicate player id: {id}")]
    DuplicateId { id: String },

    #[error("player {id} has an empty position set")]
    EmptyPositions { id: String },

    #[error("player {id} has ownership {value} outside [0, 1]")]
    OwnershipOutOfRange { id: String, value: f64 },
}

/// Misconfiguration detected eagerly at `generate()` entry.
///
/// None of these are recoverable by retrying candidates, so they fail the
/// run before the RNG stream is even created.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("roster template has no slots")]
    EmptyRoster,

    #[error("salary cap must be positive, got {0}")]
    NonPositiveSalaryCap(u32),

    #[error("max_per_team must be positive")]
    ZeroTeamLimit,

    #[error("pool has {pool} players but the roster needs {slots}")]
    PoolTooSmall { pool: usize, slots: usize },

    #[error("requested lineup count must be positive")]
    ZeroFieldSize,

    #[error("ownership_alpha must be finite and >= 0, got {0}")]
    InvalidAlpha(f64),

    #[error("diversity_target must be within [0, 1], got {0}")]
    InvalidDiversityTarget(f64),

    #[error("max_attempts_multiplier must be positive")]
    ZeroAttemptBudget,

    #[error("tier_weights must be non-empty, finite and positive")]
    InvalidTierWeights,
}

/// Errors surfaced by the JSON API layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
