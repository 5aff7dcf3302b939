use lodestone_core::config::FusionConfig;

use super::{linear, Blend, PathSignals};

/// `final = wv·cv + wg·cg` with the configured weights.
pub(super) fn blend(vector: &PathSignals, graph: &PathSignals, config: &FusionConfig) -> Blend {
    linear(vector, graph, config.vector_weight, config.graph_weight)
}
