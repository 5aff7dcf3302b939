use serde::{Deserialize, Serialize};

use super::defaults;

/// Named confidence comparison points. Call sites pick the one they mean;
/// there is no single universal threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// At or below this final confidence a query is treated as off-domain.
    pub off_domain: f64,
    /// At or above this final confidence an answer counts as high confidence.
    pub high_confidence: f64,
}

impl ThresholdConfig {
    pub fn is_off_domain(&self, final_confidence: f64) -> bool {
        final_confidence <= self.off_domain
    }

    pub fn is_high_confidence(&self, final_confidence: f64) -> bool {
        final_confidence >= self.high_confidence
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            off_domain: defaults::DEFAULT_OFF_DOMAIN_THRESHOLD,
            high_confidence: defaults::DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
        }
    }
}
