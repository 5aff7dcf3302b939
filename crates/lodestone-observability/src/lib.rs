//! # lodestone-observability
//!
//! Health aggregation over breaker snapshots, tracing subscriber setup,
//! span macros, and the structured log events emitted on the query path.

pub mod health;
pub mod tracing_setup;

pub use health::HealthAggregator;
pub use tracing_setup::events;
