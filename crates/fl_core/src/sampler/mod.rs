//! Seeded rejection sampler: configuration, draw weights, engine.

pub mod config;
pub mod engine;
pub mod weights;

pub use config::SamplerConfig;
pub use engine::{generate, generate_sharded, SampleBatch, SampleOutcome, SamplerEngine};
