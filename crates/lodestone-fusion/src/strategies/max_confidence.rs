use lodestone_core::config::FusionConfig;

use super::{Blend, PathSignals};

/// The stronger path wins; the weaker adds `minority_blend` of its
/// confidence on top, capped at 1. Contributions follow confidence.
pub(super) fn blend(vector: &PathSignals, graph: &PathSignals, config: &FusionConfig) -> Blend {
    let (cv, cg) = (vector.confidence, graph.confidence);
    Blend {
        vector_weight: cv,
        graph_weight: cg,
        final_confidence: (cv.max(cg) + cv.min(cg) * config.minority_blend).min(1.0),
    }
}
