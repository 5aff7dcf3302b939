//! Fusion strategies as a function table over the closed strategy enum.
//!
//! Each strategy sees only per-path signals and returns a [`Blend`]: raw
//! per-path weights plus the fused confidence. The engine turns the weights
//! into contributions, so strategies never special-case failed paths beyond
//! what their own formula needs.

mod adaptive_fusion;
mod advanced_hybrid;
mod max_confidence;
mod weighted_linear;

use lodestone_core::config::FusionConfig;
use lodestone_core::models::{FusionStrategy, ScoredResult};

use crate::citations::cites_regulation;

/// What a strategy knows about one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSignals {
    pub confidence: f64,
    pub succeeded: bool,
    pub fragment_count: usize,
    pub cites_regulation: bool,
}

impl PathSignals {
    pub fn from_scored(scored: &ScoredResult) -> Self {
        Self {
            confidence: scored.confidence.value(),
            succeeded: scored.succeeded(),
            fragment_count: scored.items().len(),
            cites_regulation: cites_regulation(scored.items()),
        }
    }

    /// A path that succeeded with the given confidence and no other signal.
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            confidence,
            succeeded: true,
            fragment_count: 1,
            cites_regulation: false,
        }
    }
}

/// Strategy output before contribution normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Unnormalized share of the vector path.
    pub vector_weight: f64,
    /// Unnormalized share of the graph path.
    pub graph_weight: f64,
    pub final_confidence: f64,
}

pub type StrategyFn = fn(&PathSignals, &PathSignals, &FusionConfig) -> Blend;

/// The function implementing `strategy`.
pub fn strategy_fn(strategy: FusionStrategy) -> StrategyFn {
    match strategy {
        FusionStrategy::WeightedLinear => weighted_linear::blend,
        FusionStrategy::MaxConfidence => max_confidence::blend,
        FusionStrategy::AdvancedHybrid => advanced_hybrid::blend,
        FusionStrategy::AdaptiveFusion => adaptive_fusion::blend,
    }
}

/// Linear combination with the given weights. Shared by the linear strategies.
pub(crate) fn linear(
    vector: &PathSignals,
    graph: &PathSignals,
    vector_weight: f64,
    graph_weight: f64,
) -> Blend {
    let v = vector_weight * vector.confidence;
    let g = graph_weight * graph.confidence;
    Blend {
        vector_weight: v,
        graph_weight: g,
        final_confidence: v + g,
    }
}
