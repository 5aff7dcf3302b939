use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Parallel retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Bound on the whole vector path, embedding included (milliseconds).
    pub vector_timeout_ms: u64,
    /// Bound on the graph path (milliseconds).
    pub graph_timeout_ms: u64,
    /// Maximum evidence fragments requested from each backend.
    pub result_limit: usize,
    /// Longest accepted query text, in characters.
    pub max_query_chars: usize,
}

impl RetrievalConfig {
    pub fn vector_timeout(&self) -> Duration {
        Duration::from_millis(self.vector_timeout_ms)
    }

    pub fn graph_timeout(&self) -> Duration {
        Duration::from_millis(self.graph_timeout_ms)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_timeout_ms: defaults::DEFAULT_VECTOR_TIMEOUT_MS,
            graph_timeout_ms: defaults::DEFAULT_GRAPH_TIMEOUT_MS,
            result_limit: defaults::DEFAULT_RESULT_LIMIT,
            max_query_chars: defaults::DEFAULT_MAX_QUERY_CHARS,
        }
    }
}
