use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds and timing for one circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures in CLOSED before the breaker opens.
    pub failure_threshold: u32,
    /// Consecutive HALF_OPEN successes before the breaker closes.
    pub success_threshold: u32,
    /// First OPEN period (milliseconds).
    pub base_timeout_ms: u64,
    /// Ceiling for the OPEN period after repeated HALF_OPEN failures (milliseconds).
    pub max_timeout_ms: u64,
    /// Factor applied to the OPEN period on each HALF_OPEN failure.
    pub backoff_multiplier: f64,
    /// Concurrent trial calls admitted while HALF_OPEN. `None` = `success_threshold`.
    pub half_open_max_trials: Option<u32>,
}

impl BreakerConfig {
    pub fn base_timeout(&self) -> Duration {
        Duration::from_millis(self.base_timeout_ms)
    }

    pub fn max_timeout(&self) -> Duration {
        Duration::from_millis(self.max_timeout_ms)
    }

    /// Effective number of HALF_OPEN trial slots (never zero).
    pub fn trial_slots(&self) -> u32 {
        self.half_open_max_trials
            .unwrap_or(self.success_threshold)
            .max(1)
    }
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: defaults::DEFAULT_FAILURE_THRESHOLD,
            success_threshold: defaults::DEFAULT_SUCCESS_THRESHOLD,
            base_timeout_ms: defaults::DEFAULT_BASE_TIMEOUT_MS,
            max_timeout_ms: defaults::DEFAULT_MAX_TIMEOUT_MS,
            backoff_multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
            half_open_max_trials: None,
        }
    }
}

/// Breaker settings: one shared default plus per-dependency overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakersConfig {
    /// Applied to every dependency without an override.
    pub default: BreakerConfig,
    /// Keyed by dependency name (`vector_store`, `graph_store`, ...).
    pub overrides: BTreeMap<String, BreakerConfig>,
}

impl BreakersConfig {
    /// Resolve the config for a named dependency.
    pub fn for_dependency(&self, name: &str) -> BreakerConfig {
        self.overrides.get(name).copied().unwrap_or(self.default)
    }
}
