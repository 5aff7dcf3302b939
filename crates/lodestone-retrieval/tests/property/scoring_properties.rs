//! Property tests for path-local confidence scoring.

use std::time::Duration;

use lodestone_core::config::ScoringConfig;
use lodestone_core::models::{EvidenceFragment, FailureReason, PathKind, RetrievalResult};
use lodestone_retrieval::ConfidenceScorer;
use proptest::prelude::*;

fn success(relevances: &[f64]) -> RetrievalResult {
    let items = relevances
        .iter()
        .enumerate()
        .map(|(i, r)| EvidenceFragment::new(format!("item {i}"), *r))
        .collect();
    RetrievalResult::success(PathKind::Graph, items, Duration::from_millis(1))
}

fn arb_config() -> impl Strategy<Value = ScoringConfig> {
    (1usize..20, 0.0f64..=1.0).prop_map(|(saturation_point, coverage_weight)| ScoringConfig {
        saturation_point,
        coverage_weight,
    })
}

// ── Confidence is always within [0, 1] ──

proptest! {
    #[test]
    fn confidence_is_bounded(
        config in arb_config(),
        relevances in prop::collection::vec(-2.0f64..3.0, 0..40),
    ) {
        let c = ConfidenceScorer::new(config).confidence(&success(&relevances)).value();
        prop_assert!((0.0..=1.0).contains(&c), "confidence {} out of range", c);
    }
}

// ── Confidence never exceeds mean relevance ──

proptest! {
    #[test]
    fn confidence_bounded_by_mean_relevance(
        config in arb_config(),
        relevances in prop::collection::vec(0.0f64..=1.0, 1..40),
    ) {
        let mean = relevances.iter().sum::<f64>() / relevances.len() as f64;
        let c = ConfidenceScorer::new(config).confidence(&success(&relevances)).value();
        prop_assert!(c <= mean + 1e-9);
    }
}

// ── Adding an item at the current mean relevance never lowers confidence ──

proptest! {
    #[test]
    fn monotone_in_item_count(
        config in arb_config(),
        relevance in 0.0f64..=1.0,
        n in 1usize..30,
    ) {
        let scorer = ConfidenceScorer::new(config);
        let fewer = scorer.confidence(&success(&vec![relevance; n])).value();
        let more = scorer.confidence(&success(&vec![relevance; n + 1])).value();
        prop_assert!(more + 1e-12 >= fewer);
    }
}

// ── Failed paths always score zero ──

proptest! {
    #[test]
    fn failure_scores_zero(config in arb_config()) {
        let failed = RetrievalResult::failure(
            PathKind::Vector,
            FailureReason::BreakerOpen { dependency: "vector_store".into() },
            Duration::ZERO,
        );
        prop_assert!(ConfidenceScorer::new(config).confidence(&failed).is_zero());
    }
}
