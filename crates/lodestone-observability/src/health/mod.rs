//! Health checking subsystem.
//!
//! [`HealthAggregator`] maps breaker snapshots to one process-wide
//! [`HealthReport`](lodestone_core::models::HealthReport) without touching
//! the query path.

pub mod aggregator;

pub use aggregator::{liveness_status, HealthAggregator};
