use lodestone_core::config::FusionConfig;

use super::{linear, Blend, PathSignals};

/// Linear fusion over reliability-adjusted weights.
///
/// The graph prior grows by `citation_boost` when its evidence cites a
/// specific regulation; the vector prior grows by `corroboration_boost` when
/// it returned at least `corroboration_min_fragments` fragments. Priors are
/// renormalized to sum to one before combining.
pub(super) fn blend(vector: &PathSignals, graph: &PathSignals, config: &FusionConfig) -> Blend {
    let (wv, wg) = priors(vector, graph, config);
    linear(vector, graph, wv, wg)
}

fn priors(vector: &PathSignals, graph: &PathSignals, config: &FusionConfig) -> (f64, f64) {
    let mut pv = config.vector_weight;
    let mut pg = config.graph_weight;

    if graph.succeeded && graph.cites_regulation {
        pg *= 1.0 + config.citation_boost;
    }
    if vector.succeeded && vector.fragment_count >= config.corroboration_min_fragments {
        pv *= 1.0 + config.corroboration_boost;
    }

    let total = pv + pg;
    if total <= 0.0 {
        return (0.5, 0.5);
    }
    (pv / total, pg / total)
}
