use serde::{Deserialize, Serialize};

use super::{Confidence, EvidenceFragment, FusionStrategy, PathKind};

/// A deduplicated fragment in the fused context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedFragment {
    pub fragment: EvidenceFragment,
    /// Paths that returned this fragment, vector first.
    pub sources: Vec<PathKind>,
    /// Relevance weighted by path contribution, summed across sources.
    pub score: f64,
}

impl FusedFragment {
    /// Returned by both paths.
    pub fn is_corroborated(&self) -> bool {
        self.sources.len() > 1
    }
}

/// The combined outcome of both retrieval paths for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub strategy: FusionStrategy,
    pub vector_confidence: Confidence,
    pub graph_confidence: Confidence,
    pub final_confidence: Confidence,
    /// Sums to 1.0 with `graph_contribution` when both paths succeeded;
    /// zero for a failed path.
    pub vector_contribution: f64,
    pub graph_contribution: f64,
    pub quality_score: f64,
    pub fusion_ready: bool,
    pub fused_context: Vec<FusedFragment>,
    /// Paths that did not succeed.
    pub degraded_paths: Vec<PathKind>,
}

impl FusionResult {
    pub fn contribution(&self, path: PathKind) -> f64 {
        match path {
            PathKind::Vector => self.vector_contribution,
            PathKind::Graph => self.graph_contribution,
        }
    }

    pub fn confidence(&self, path: PathKind) -> Confidence {
        match path {
            PathKind::Vector => self.vector_confidence,
            PathKind::Graph => self.graph_confidence,
        }
    }

    /// Neither path produced evidence.
    pub fn is_unavailable(&self) -> bool {
        self.degraded_paths.len() == PathKind::BOTH.len()
    }
}
