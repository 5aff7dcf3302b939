pub mod breaker_config;
pub mod defaults;
pub mod fusion_config;
pub mod generation_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod scoring_config;
pub mod server_config;
pub mod threshold_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use breaker_config::{BreakerConfig, BreakersConfig};
pub use fusion_config::FusionConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use scoring_config::ScoringConfig;
pub use server_config::ServerConfig;
pub use threshold_config::ThresholdConfig;

use crate::constants::WEIGHT_EPSILON;
use crate::errors::{LodestoneError, LodestoneResult};
use crate::models::FusionStrategy;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LodestoneConfig {
    pub breaker: BreakersConfig,
    pub retrieval: RetrievalConfig,
    pub scoring: ScoringConfig,
    pub fusion: FusionConfig,
    pub thresholds: ThresholdConfig,
    pub generation: GenerationConfig,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

impl LodestoneConfig {
    /// Parse a TOML string. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> LodestoneResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LodestoneError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&raw)
            .map_err(|e| LodestoneError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engines cannot honor.
    pub fn validate(&self) -> LodestoneResult<()> {
        let mut breakers = vec![("default", &self.breaker.default)];
        breakers.extend(self.breaker.overrides.iter().map(|(k, v)| (k.as_str(), v)));
        for (name, b) in breakers {
            if b.failure_threshold == 0 || b.success_threshold == 0 {
                return Err(config_err(format!("breaker `{name}`: thresholds must be >= 1")));
            }
            if b.base_timeout_ms == 0 || b.max_timeout_ms < b.base_timeout_ms {
                return Err(config_err(format!(
                    "breaker `{name}`: need 0 < base_timeout_ms <= max_timeout_ms"
                )));
            }
            if b.backoff_multiplier.is_nan() || b.backoff_multiplier < 1.0 {
                return Err(config_err(format!(
                    "breaker `{name}`: backoff_multiplier must be >= 1.0"
                )));
            }
        }

        if self.retrieval.vector_timeout_ms == 0 || self.retrieval.graph_timeout_ms == 0 {
            return Err(config_err("retrieval timeouts must be non-zero".into()));
        }
        if self.retrieval.result_limit == 0 || self.retrieval.max_query_chars == 0 {
            return Err(config_err("retrieval limits must be non-zero".into()));
        }
        if self.scoring.saturation_point == 0 {
            return Err(config_err("scoring.saturation_point must be >= 1".into()));
        }

        let f = &self.fusion;
        f.default_strategy.parse::<FusionStrategy>()?;
        if f.vector_weight < 0.0
            || f.graph_weight < 0.0
            || (f.vector_weight + f.graph_weight - 1.0).abs() > WEIGHT_EPSILON
        {
            return Err(crate::errors::FusionError::InvalidWeights {
                vector: f.vector_weight,
                graph: f.graph_weight,
            }
            .into());
        }

        let unit_fields = [
            ("scoring.coverage_weight", self.scoring.coverage_weight),
            ("fusion.minority_blend", f.minority_blend),
            ("fusion.fusion_floor", f.fusion_floor),
            ("fusion.agreement_band", f.agreement_band),
            ("fusion.single_path_quality_penalty", f.single_path_quality_penalty),
            ("thresholds.off_domain", self.thresholds.off_domain),
            ("thresholds.high_confidence", self.thresholds.high_confidence),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_err(format!("{field} must be within [0, 1], got {value}")));
            }
        }
        if f.citation_boost < 0.0 || f.corroboration_boost < 0.0 {
            return Err(config_err("fusion prior boosts must be non-negative".into()));
        }

        Ok(())
    }
}

fn config_err(msg: String) -> LodestoneError {
    LodestoneError::ConfigError(msg)
}
