use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-path confidence scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Item count at which coverage stops growing.
    pub saturation_point: usize,
    /// Share of the score driven by coverage; the rest is always relevance.
    pub coverage_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            saturation_point: defaults::DEFAULT_SATURATION_POINT,
            coverage_weight: defaults::DEFAULT_COVERAGE_WEIGHT,
        }
    }
}
