use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Confidence, EvidenceFragment, PathKind};
use crate::errors::UpstreamError;

/// Why a retrieval path produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The path's breaker refused the call; the dependency was not invoked.
    BreakerOpen { dependency: String },
    /// The path exceeded its latency bound.
    Timeout { dependency: String },
    /// The dependency call returned an error.
    Error { dependency: String, message: String },
}

impl From<&UpstreamError> for FailureReason {
    fn from(err: &UpstreamError) -> Self {
        match err {
            UpstreamError::Unavailable { dependency } => Self::BreakerOpen {
                dependency: dependency.clone(),
            },
            UpstreamError::Timeout { dependency, .. } => Self::Timeout {
                dependency: dependency.clone(),
            },
            UpstreamError::Failed { dependency, reason } => Self::Error {
                dependency: dependency.clone(),
                message: reason.clone(),
            },
        }
    }
}

/// Output of one retrieval path for one query. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub source: PathKind,
    /// Evidence in backend order.
    pub items: Vec<EvidenceFragment>,
    pub raw_latency: Duration,
    pub succeeded: bool,
    pub failure_reason: Option<FailureReason>,
}

impl RetrievalResult {
    /// A successful path. Fragments are normalized (identity filled, relevance clamped).
    pub fn success(source: PathKind, items: Vec<EvidenceFragment>, raw_latency: Duration) -> Self {
        Self {
            source,
            items: items.into_iter().map(EvidenceFragment::normalized).collect(),
            raw_latency,
            succeeded: true,
            failure_reason: None,
        }
    }

    /// A failed path. Carries no evidence.
    pub fn failure(source: PathKind, reason: FailureReason, raw_latency: Duration) -> Self {
        Self {
            source,
            items: Vec::new(),
            raw_latency,
            succeeded: false,
            failure_reason: Some(reason),
        }
    }

    /// True when the breaker rejected the call without invoking the dependency.
    pub fn was_rejected(&self) -> bool {
        matches!(self.failure_reason, Some(FailureReason::BreakerOpen { .. }))
    }
}

/// A retrieval result with its path-local confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub result: RetrievalResult,
    pub confidence: Confidence,
}

impl ScoredResult {
    pub fn source(&self) -> PathKind {
        self.result.source
    }

    pub fn succeeded(&self) -> bool {
        self.result.succeeded
    }

    pub fn items(&self) -> &[EvidenceFragment] {
        &self.result.items
    }
}
