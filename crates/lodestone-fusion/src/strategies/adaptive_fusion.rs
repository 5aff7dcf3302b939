use lodestone_core::config::FusionConfig;

use super::{Blend, PathSignals};

/// Per-query weights from path agreement.
///
/// A zero-confidence path hands everything to the other. Otherwise the
/// agreement `a = 1 − |cv − cg| / agreement_band` (clamped to [0, 1]) blends
/// inverse-variance weights (paths agree: trust the tighter estimate) with
/// confidence-proportional weights (paths disagree: trust the stronger one).
pub(super) fn blend(vector: &PathSignals, graph: &PathSignals, config: &FusionConfig) -> Blend {
    let (cv, cg) = (vector.confidence, graph.confidence);

    if cv <= 0.0 && cg <= 0.0 {
        return Blend {
            vector_weight: 0.0,
            graph_weight: 0.0,
            final_confidence: 0.0,
        };
    }
    if cg <= 0.0 {
        return Blend {
            vector_weight: 1.0,
            graph_weight: 0.0,
            final_confidence: cv,
        };
    }
    if cv <= 0.0 {
        return Blend {
            vector_weight: 0.0,
            graph_weight: 1.0,
            final_confidence: cg,
        };
    }

    let agreement = if config.agreement_band > 0.0 {
        (1.0 - (cv - cg).abs() / config.agreement_band).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (iv_v, iv_g) = normalize(
        1.0 / variance(cv, vector.fragment_count),
        1.0 / variance(cg, graph.fragment_count),
    );
    let (pc_v, pc_g) = normalize(cv, cg);

    let wv = agreement * iv_v + (1.0 - agreement) * pc_v;
    let wg = agreement * iv_g + (1.0 - agreement) * pc_g;

    Blend {
        vector_weight: wv,
        graph_weight: wg,
        final_confidence: wv * cv + wg * cg,
    }
}

/// Bernoulli-style variance of a confidence estimate backed by `n` fragments.
fn variance(confidence: f64, n: usize) -> f64 {
    (confidence * (1.0 - confidence) + 0.01) / n.max(1) as f64
}

fn normalize(a: f64, b: f64) -> (f64, f64) {
    let total = a + b;
    if total <= 0.0 {
        (0.5, 0.5)
    } else {
        (a / total, b / total)
    }
}
