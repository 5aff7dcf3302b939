//! FusionEngine: strategy dispatch, contribution normalization, readiness.

use lodestone_core::config::FusionConfig;
use lodestone_core::errors::FusionError;
use lodestone_core::models::{Confidence, FusionResult, FusionStrategy, ScoredResult};
use lodestone_observability::{events, fusion_span};

use crate::merge::merge_context;
use crate::quality::quality_score;
use crate::strategies::{strategy_fn, PathSignals};

/// Combines two scored paths into one [`FusionResult`].
///
/// Contributions always follow path outcomes: both succeeded, they sum to
/// one; one succeeded, it takes everything; none, both are zero.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    config: FusionConfig,
    default_strategy: FusionStrategy,
}

impl FusionEngine {
    /// Fails if the configured default strategy is unknown.
    pub fn new(config: FusionConfig) -> Result<Self, FusionError> {
        let default_strategy = config.default_strategy.parse()?;
        Ok(Self {
            config,
            default_strategy,
        })
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn default_strategy(&self) -> FusionStrategy {
        self.default_strategy
    }

    /// Strict parse. Unknown names are `InvalidStrategy`.
    pub fn parse_strategy(&self, name: &str) -> Result<FusionStrategy, FusionError> {
        name.trim().parse()
    }

    /// Lenient parse for the request boundary: a missing or unknown name
    /// falls back to the configured default and logs `strategy_fallback`.
    pub fn resolve_strategy(&self, requested: Option<&str>) -> FusionStrategy {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            None => self.default_strategy,
            Some(name) => self.parse_strategy(name).unwrap_or_else(|_| {
                events::strategy_fallback(name, self.default_strategy.as_str());
                self.default_strategy
            }),
        }
    }

    pub fn fuse(
        &self,
        strategy: FusionStrategy,
        vector: &ScoredResult,
        graph: &ScoredResult,
    ) -> FusionResult {
        let _span = fusion_span!(strategy).entered();

        let vector_signals = PathSignals::from_scored(vector);
        let graph_signals = PathSignals::from_scored(graph);
        let blend = strategy_fn(strategy)(&vector_signals, &graph_signals, &self.config);

        let (vector_contribution, graph_contribution) =
            match (vector.succeeded(), graph.succeeded()) {
                (true, true) => normalize(blend.vector_weight, blend.graph_weight),
                (true, false) => (1.0, 0.0),
                (false, true) => (0.0, 1.0),
                (false, false) => (0.0, 0.0),
            };

        let any_succeeded = vector.succeeded() || graph.succeeded();
        let final_confidence = if any_succeeded {
            Confidence::new(blend.final_confidence)
        } else {
            Confidence::ZERO
        };

        let fusion_ready = [vector, graph]
            .iter()
            .any(|p| p.succeeded() && p.confidence.value() > self.config.fusion_floor);

        let degraded_paths = [vector, graph]
            .iter()
            .filter(|p| !p.succeeded())
            .map(|p| p.source())
            .collect();

        let result = FusionResult {
            strategy,
            vector_confidence: vector.confidence,
            graph_confidence: graph.confidence,
            final_confidence,
            vector_contribution,
            graph_contribution,
            quality_score: quality_score(vector, graph, &self.config),
            fusion_ready,
            fused_context: merge_context(
                vector,
                graph,
                vector_contribution,
                graph_contribution,
                self.config.max_fused_fragments,
            ),
            degraded_paths,
        };

        events::fusion_completed(
            strategy.as_str(),
            result.final_confidence.value(),
            result.quality_score,
            result.fusion_ready,
        );
        result
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self {
            config: FusionConfig::default(),
            default_strategy: FusionStrategy::default(),
        }
    }
}

/// Scale two non-negative weights to sum to one; equal split when both are zero.
fn normalize(vector: f64, graph: f64) -> (f64, f64) {
    let vector = vector.max(0.0);
    let graph = graph.max(0.0);
    let total = vector + graph;
    if total <= 0.0 || !total.is_finite() {
        return (0.5, 0.5);
    }
    let v = vector / total;
    (v, 1.0 - v)
}
