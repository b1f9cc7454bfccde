//! # fl_core - Deterministic Fantasy Lineup Sampling Engine
//!
//! This library generates batches of structurally valid fantasy-sports
//! lineups by seeded rejection sampling, with one shared validator as the
//! single source of truth for lineup legality across every pipeline stage.
//!
//! ## Features
//! - 100% deterministic sampling (same seed = same batch)
//! - Matching-based slot allocation (no greedy false infeasibility)
//! - Collect-all violation reporting for batch diagnostics
//! - Exposure / overlap / concentration metrics per batch
//! - JSON API for easy integration with host processes

// Allow unused code for features under development
#![allow(dead_code)]

pub mod analysis;
pub mod api;
pub mod error;
pub mod models;
pub mod sampler;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export main API functions
pub use api::{generate_lineups_json, validate_lineup_json, SCHEMA_VERSION};
pub use error::{ApiError, ConfigError, PoolError};

// Re-export the core model types
pub use analysis::metrics::{Metrics, MetricsCollector};
pub use models::{InjuryStatus, Lineup, Player, PlayerPool, Position, PositionSet, Rules,
    SlotRequirement, SlotSpec};
pub use sampler::{
    generate, generate_sharded, SampleBatch, SampleOutcome, SamplerConfig, SamplerEngine,
};
pub use validate::{validate, ValidationResult, ViolationCode};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
