//! Agreement-aware quality score.
//!
//! - no path succeeded: 0
//! - one path: its confidence × `single_path_quality_penalty`
//! - both: mean confidence × (1 − |Δ|) × (0.7 + 0.3 × corroboration)
//!
//! Corroboration is the larger of the fragment-identity Jaccard overlap and
//! the cited-regulation Jaccard overlap between the two paths.

use std::collections::BTreeSet;

use lodestone_core::config::FusionConfig;
use lodestone_core::models::{EvidenceFragment, ScoredResult};

use crate::citations::citation_set;

const CORROBORATION_SHARE: f64 = 0.3;

pub fn quality_score(vector: &ScoredResult, graph: &ScoredResult, config: &FusionConfig) -> f64 {
    let (cv, cg) = (vector.confidence.value(), graph.confidence.value());
    let score = match (vector.succeeded(), graph.succeeded()) {
        (false, false) => 0.0,
        (true, false) => cv * config.single_path_quality_penalty,
        (false, true) => cg * config.single_path_quality_penalty,
        (true, true) => {
            let mean = (cv + cg) / 2.0;
            let agreement = 1.0 - (cv - cg).abs();
            let support = corroboration(vector.items(), graph.items());
            mean * agreement * ((1.0 - CORROBORATION_SHARE) + CORROBORATION_SHARE * support)
        }
    };
    score.clamp(0.0, 1.0)
}

/// How much the two paths' evidence overlaps, in [0, 1].
pub fn corroboration(vector: &[EvidenceFragment], graph: &[EvidenceFragment]) -> f64 {
    let ids = |items: &[EvidenceFragment]| -> BTreeSet<String> {
        items.iter().map(|f| f.id.clone()).collect()
    };
    let by_identity = jaccard(&ids(vector), &ids(graph));
    let by_citation = jaccard(&citation_set(vector), &citation_set(graph));
    by_identity.max(by_citation)
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
