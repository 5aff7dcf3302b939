//! Path-local confidence scoring.
//!
//! confidence = mean relevance × ((1 − w) + w × coverage), where coverage is
//! the item count capped at the saturation point, over the saturation point,
//! and w is the coverage weight. An empty result scores 0 however relevant
//! the backend claims it is; many weak items cannot exceed their mean
//! relevance.

use lodestone_core::config::ScoringConfig;
use lodestone_core::models::{Confidence, RetrievalResult, ScoredResult};

/// Maps one path's raw result to a [0, 1] confidence. No cross-path knowledge.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ScoringConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, result: RetrievalResult) -> ScoredResult {
        let confidence = self.confidence(&result);
        ScoredResult { result, confidence }
    }

    pub fn confidence(&self, result: &RetrievalResult) -> Confidence {
        if !result.succeeded || result.items.is_empty() {
            return Confidence::ZERO;
        }

        let n = result.items.len();
        let mean_relevance =
            result.items.iter().map(|f| f.relevance).sum::<f64>() / n as f64;

        let saturation = self.config.saturation_point.max(1);
        let coverage = n.min(saturation) as f64 / saturation as f64;
        let w = self.config.coverage_weight.clamp(0.0, 1.0);

        Confidence::new(mean_relevance * ((1.0 - w) + w * coverage))
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lodestone_core::models::{EvidenceFragment, FailureReason, PathKind};

    use super::*;

    fn result(relevances: &[f64]) -> RetrievalResult {
        let items = relevances
            .iter()
            .enumerate()
            .map(|(i, r)| EvidenceFragment::new(format!("fragment {i}"), *r))
            .collect();
        RetrievalResult::success(PathKind::Vector, items, Duration::from_millis(5))
    }

    #[test]
    fn failed_path_scores_zero() {
        let failed = RetrievalResult::failure(
            PathKind::Graph,
            FailureReason::Timeout {
                dependency: "graph_store".into(),
            },
            Duration::from_secs(8),
        );
        assert!(ConfidenceScorer::default().confidence(&failed).is_zero());
    }

    #[test]
    fn empty_success_scores_zero() {
        assert!(ConfidenceScorer::default().confidence(&result(&[])).is_zero());
    }

    #[test]
    fn saturated_result_scores_mean_relevance() {
        let c = ConfidenceScorer::default().confidence(&result(&[0.8; 5]));
        assert!((c.value() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn single_item_is_discounted() {
        // mean 0.9 × (0.5 + 0.5 × 1/5) = 0.54
        let c = ConfidenceScorer::default().confidence(&result(&[0.9]));
        assert!((c.value() - 0.54).abs() < 1e-9);
    }

    #[test]
    fn many_weak_items_stay_weak() {
        let c = ConfidenceScorer::default().confidence(&result(&[0.1; 50]));
        assert!(c.value() <= 0.1 + 1e-9);
    }

    #[test]
    fn more_items_never_lower_confidence_at_equal_relevance() {
        let scorer = ConfidenceScorer::default();
        let mut last = 0.0;
        for n in 1..10 {
            let c = scorer.confidence(&result(&vec![0.7; n])).value();
            assert!(c >= last);
            last = c;
        }
    }
}
