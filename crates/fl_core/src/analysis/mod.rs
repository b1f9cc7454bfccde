//! Batch analysis over sampler output.

pub mod metrics;

pub use metrics::{Metrics, MetricsCollector, RejectionTally};
