//! Property tests for the fusion engine.

use std::time::Duration;

use lodestone_core::models::{
    Confidence, EvidenceFragment, FailureReason, FusionStrategy, PathKind, RetrievalResult,
    ScoredResult,
};
use lodestone_fusion::FusionEngine;
use proptest::prelude::*;

fn arb_strategy() -> impl Strategy<Value = FusionStrategy> {
    prop_oneof![
        Just(FusionStrategy::WeightedLinear),
        Just(FusionStrategy::MaxConfidence),
        Just(FusionStrategy::AdvancedHybrid),
        Just(FusionStrategy::AdaptiveFusion),
    ]
}

/// A path outcome: `None` = failed, otherwise confidence plus fragment relevances.
fn arb_path() -> impl Strategy<Value = Option<(f64, Vec<(u8, f64)>)>> {
    prop::option::weighted(
        0.8,
        (0.0f64..=1.0, prop::collection::vec((0u8..12, 0.0f64..=1.0), 0..10)),
    )
}

fn build(path: PathKind, outcome: &Option<(f64, Vec<(u8, f64)>)>) -> ScoredResult {
    match outcome {
        None => ScoredResult {
            result: RetrievalResult::failure(
                path,
                FailureReason::Error {
                    dependency: path.dependency().into(),
                    message: "injected".into(),
                },
                Duration::ZERO,
            ),
            confidence: Confidence::ZERO,
        },
        Some((confidence, items)) => ScoredResult {
            result: RetrievalResult::success(
                path,
                items
                    .iter()
                    .map(|(id, rel)| {
                        EvidenceFragment::new(format!("passage {id} under 30 CFR 75.{id}"), *rel)
                    })
                    .collect(),
                Duration::ZERO,
            ),
            confidence: Confidence::new(*confidence),
        },
    }
}

// ── Contributions follow path outcomes ──

proptest! {
    #[test]
    fn contributions_sum_rule(strategy in arb_strategy(), v in arb_path(), g in arb_path()) {
        let engine = FusionEngine::default();
        let r = engine.fuse(strategy, &build(PathKind::Vector, &v), &build(PathKind::Graph, &g));
        match (v.is_some(), g.is_some()) {
            (true, true) => prop_assert!((r.vector_contribution + r.graph_contribution - 1.0).abs() < 1e-6),
            (true, false) => prop_assert_eq!((r.vector_contribution, r.graph_contribution), (1.0, 0.0)),
            (false, true) => prop_assert_eq!((r.vector_contribution, r.graph_contribution), (0.0, 1.0)),
            (false, false) => prop_assert_eq!((r.vector_contribution, r.graph_contribution), (0.0, 0.0)),
        }
    }
}

// ── Final confidence and quality stay in [0, 1] ──

proptest! {
    #[test]
    fn outputs_bounded(strategy in arb_strategy(), v in arb_path(), g in arb_path()) {
        let r = FusionEngine::default().fuse(strategy, &build(PathKind::Vector, &v), &build(PathKind::Graph, &g));
        prop_assert!((0.0..=1.0).contains(&r.final_confidence.value()));
        prop_assert!((0.0..=1.0).contains(&r.quality_score));
    }
}

// ── max_confidence never falls below the stronger path ──

proptest! {
    #[test]
    fn max_confidence_dominates(cv in 0.0f64..=1.0, cg in 0.0f64..=1.0) {
        let v = build(PathKind::Vector, &Some((cv, vec![(1, cv)])));
        let g = build(PathKind::Graph, &Some((cg, vec![(2, cg)])));
        let r = FusionEngine::default().fuse(FusionStrategy::MaxConfidence, &v, &g);
        prop_assert!(r.final_confidence.value() + 1e-12 >= cv.max(cg));
    }
}

// ── Fused context only ever holds retrieved fragments, each once ──

proptest! {
    #[test]
    fn fused_context_is_retrieved_and_unique(strategy in arb_strategy(), v in arb_path(), g in arb_path()) {
        let vector = build(PathKind::Vector, &v);
        let graph = build(PathKind::Graph, &g);
        let r = FusionEngine::default().fuse(strategy, &vector, &graph);

        let retrieved: Vec<&str> = vector.items().iter().chain(graph.items()).map(|f| f.id.as_str()).collect();
        let mut seen = std::collections::HashSet::new();
        for fused in &r.fused_context {
            prop_assert!(retrieved.contains(&fused.fragment.id.as_str()));
            prop_assert!(seen.insert(fused.fragment.id.clone()));
        }
        prop_assert!(r.fused_context.len() <= 12);
    }
}
