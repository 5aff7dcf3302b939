use serde::{Deserialize, Serialize};

use super::defaults;

/// Context fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Strategy used when a request names none, or names an unknown one.
    pub default_strategy: String,
    /// Linear weight of the vector path. Must sum to 1 with `graph_weight`.
    pub vector_weight: f64,
    /// Linear weight of the graph path.
    pub graph_weight: f64,
    /// Share of the weaker path added on top of the stronger one (`max_confidence`).
    pub minority_blend: f64,
    /// A path must exceed this confidence for the result to be fusion-ready.
    pub fusion_floor: f64,
    /// Relative boost to the graph prior when it cites a regulation identifier.
    pub citation_boost: f64,
    /// Relative boost to the vector prior when it has many corroborating fragments.
    pub corroboration_boost: f64,
    /// Fragment count at which the vector corroboration boost applies.
    pub corroboration_min_fragments: usize,
    /// Confidence gap below which the paths are considered in agreement (`adaptive_fusion`).
    pub agreement_band: f64,
    /// Upper bound on fragments kept in the fused context.
    pub max_fused_fragments: usize,
    /// Quality multiplier when only one path contributed.
    pub single_path_quality_penalty: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            default_strategy: defaults::DEFAULT_FUSION_STRATEGY.to_string(),
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            graph_weight: defaults::DEFAULT_GRAPH_WEIGHT,
            minority_blend: defaults::DEFAULT_MINORITY_BLEND,
            fusion_floor: defaults::DEFAULT_FUSION_FLOOR,
            citation_boost: defaults::DEFAULT_CITATION_BOOST,
            corroboration_boost: defaults::DEFAULT_CORROBORATION_BOOST,
            corroboration_min_fragments: defaults::DEFAULT_CORROBORATION_MIN_FRAGMENTS,
            agreement_band: defaults::DEFAULT_AGREEMENT_BAND,
            max_fused_fragments: defaults::DEFAULT_MAX_FUSED_FRAGMENTS,
            single_path_quality_penalty: defaults::DEFAULT_SINGLE_PATH_QUALITY_PENALTY,
        }
    }
}
