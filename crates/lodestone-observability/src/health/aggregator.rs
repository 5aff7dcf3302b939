//! Breaker snapshots in, one health status out.

use chrono::Utc;
use lodestone_core::constants::{EMBEDDING_SERVICE, GRAPH_STORE, VECTOR_STORE};
use lodestone_core::models::{BreakerSnapshot, BreakerStatus, HealthReport, HealthStatus};

/// Derives the process-wide status from breaker states.
///
/// An answer path is a set of dependencies that must all be reachable for
/// that path to produce evidence. The service is unavailable only when
/// every answer path has at least one OPEN breaker.
#[derive(Debug, Clone)]
pub struct HealthAggregator {
    answer_paths: Vec<Vec<String>>,
}

impl HealthAggregator {
    pub fn new(answer_paths: Vec<Vec<String>>) -> Self {
        Self { answer_paths }
    }

    pub fn answer_paths(&self) -> &[Vec<String>] {
        &self.answer_paths
    }

    /// Build a full report from the given snapshots.
    pub fn report(&self, snapshots: Vec<BreakerSnapshot>) -> HealthReport {
        let status = self.derive_status(&snapshots);
        HealthReport {
            status,
            components: snapshots.into_iter().map(|s| (s.name.clone(), s)).collect(),
            checked_at: Utc::now(),
        }
    }

    /// `healthy` iff every breaker is CLOSED; `unavailable` iff no answer
    /// path is reachable; `degraded` otherwise.
    pub fn derive_status(&self, snapshots: &[BreakerSnapshot]) -> HealthStatus {
        if snapshots.iter().all(|s| s.state == BreakerStatus::Closed) {
            return HealthStatus::Healthy;
        }

        let is_open = |name: &str| {
            snapshots
                .iter()
                .any(|s| s.name == name && s.state == BreakerStatus::Open)
        };
        let all_paths_blocked = !self.answer_paths.is_empty()
            && self
                .answer_paths
                .iter()
                .all(|path| path.iter().any(|dep| is_open(dep)));

        if all_paths_blocked {
            HealthStatus::Unavailable
        } else {
            HealthStatus::Degraded
        }
    }
}

impl Default for HealthAggregator {
    /// Vector path needs the embedder and the vector store; graph path needs
    /// the graph store. The language model is not required.
    fn default() -> Self {
        Self::new(vec![
            vec![EMBEDDING_SERVICE.to_string(), VECTOR_STORE.to_string()],
            vec![GRAPH_STORE.to_string()],
        ])
    }
}

/// Coarse liveness: anything short of healthy reads as `degraded`.
pub fn liveness_status(status: HealthStatus) -> HealthStatus {
    match status {
        HealthStatus::Healthy => HealthStatus::Healthy,
        HealthStatus::Degraded | HealthStatus::Unavailable => HealthStatus::Degraded,
    }
}
