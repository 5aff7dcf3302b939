use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Answer generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Bound on one generator call (milliseconds).
    pub timeout_ms: u64,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::DEFAULT_GENERATION_TIMEOUT_MS,
        }
    }
}
