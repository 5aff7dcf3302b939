//! Parallel dual-path retrieval.
//!
//! Both paths always settle before this returns: success, upstream error,
//! breaker rejection, or timeout. A path failure never surfaces as an error;
//! it becomes a failed `RetrievalResult` that scores zero.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use lodestone_breaker::{BreakerRegistry, CircuitBreaker};
use lodestone_core::config::RetrievalConfig;
use lodestone_core::constants::EMBEDDING_SERVICE;
use lodestone_core::errors::{LodestoneError, LodestoneResult, UpstreamError};
use lodestone_core::models::{
    EvidenceFragment, FailureReason, PathKind, Query, RetrievalResult, ScoredResult,
};
use lodestone_core::traits::{IQueryEmbedder, IRetrievalBackend, SearchRequest};
use lodestone_observability::{events, path_span};
use tokio::time::Instant;
use tracing::{debug, Instrument};

use crate::scoring::ConfidenceScorer;

/// Scored outcome of both paths for one query.
#[derive(Debug, Clone)]
pub struct RetrievalPair {
    pub vector: ScoredResult,
    pub graph: ScoredResult,
}

impl RetrievalPair {
    pub fn get(&self, path: PathKind) -> &ScoredResult {
        match path {
            PathKind::Vector => &self.vector,
            PathKind::Graph => &self.graph,
        }
    }

    /// Paths that produced no usable result.
    pub fn degraded_paths(&self) -> Vec<PathKind> {
        PathKind::BOTH
            .into_iter()
            .filter(|p| !self.get(*p).succeeded())
            .collect()
    }

    pub fn any_succeeded(&self) -> bool {
        self.vector.succeeded() || self.graph.succeeded()
    }
}

/// Issues the vector and graph calls concurrently, each behind its breaker.
///
/// The vector path optionally embeds the query first through the
/// `embedding_service` breaker; embedding and search share the vector
/// path's latency bound.
pub struct ParallelRetriever {
    vector_backend: Arc<dyn IRetrievalBackend>,
    graph_backend: Arc<dyn IRetrievalBackend>,
    embedder: Option<(Arc<dyn IQueryEmbedder>, Arc<CircuitBreaker>)>,
    vector_breaker: Arc<CircuitBreaker>,
    graph_breaker: Arc<CircuitBreaker>,
    config: RetrievalConfig,
    scorer: ConfidenceScorer,
}

impl ParallelRetriever {
    /// Resolve the path breakers from the registry. A missing breaker is a
    /// configuration error.
    pub fn new(
        registry: &BreakerRegistry,
        vector_backend: Arc<dyn IRetrievalBackend>,
        graph_backend: Arc<dyn IRetrievalBackend>,
        config: RetrievalConfig,
        scorer: ConfidenceScorer,
    ) -> LodestoneResult<Self> {
        Ok(Self {
            vector_backend,
            graph_backend,
            embedder: None,
            vector_breaker: registry.require(PathKind::Vector.dependency())?,
            graph_breaker: registry.require(PathKind::Graph.dependency())?,
            config,
            scorer,
        })
    }

    /// Embed queries before the vector search.
    pub fn with_embedder(
        mut self,
        registry: &BreakerRegistry,
        embedder: Arc<dyn IQueryEmbedder>,
    ) -> LodestoneResult<Self> {
        let breaker = registry.require(EMBEDDING_SERVICE)?;
        self.embedder = Some((embedder, breaker));
        Ok(self)
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Run both paths and score them.
    ///
    /// Only a query the retriever cannot accept fails the call; every
    /// dependency failure is folded into the returned pair.
    pub async fn retrieve(&self, query: &Query) -> LodestoneResult<RetrievalPair> {
        query.check_length(self.config.max_query_chars)?;

        let (vector, graph) = tokio::join!(
            self.run_vector(query).instrument(path_span!(PathKind::Vector)),
            self.run_graph(query).instrument(path_span!(PathKind::Graph)),
        );

        Ok(RetrievalPair {
            vector: self.scorer.score(vector),
            graph: self.scorer.score(graph),
        })
    }

    async fn run_vector(&self, query: &Query) -> RetrievalResult {
        let timeout = self.config.vector_timeout();
        let started = Instant::now();
        let deadline = started + timeout;
        let text = query.text().to_string();

        let outcome: LodestoneResult<Vec<EvidenceFragment>> = async {
            let embedding = match &self.embedder {
                Some((embedder, breaker)) => {
                    Some(guarded(breaker, deadline, timeout, embedder.embed(&text)).await?)
                }
                None => None,
            };

            let request = SearchRequest {
                query: text,
                embedding,
                limit: self.config.result_limit,
            };
            let task = self.vector_backend.search(&request);
            guarded(&self.vector_breaker, deadline, timeout, task).await
        }
        .await;

        settle(PathKind::Vector, outcome, started.elapsed())
    }

    async fn run_graph(&self, query: &Query) -> RetrievalResult {
        let timeout = self.config.graph_timeout();
        let started = Instant::now();

        let request = SearchRequest {
            query: query.text().to_string(),
            embedding: None,
            limit: self.config.result_limit,
        };
        let task = self.graph_backend.search(&request);
        let outcome = guarded(&self.graph_breaker, started + timeout, timeout, task).await;

        settle(PathKind::Graph, outcome, started.elapsed())
    }
}

/// Run `task` through `breaker`, cancelling it at `deadline`.
///
/// A call still pending at the deadline is dropped, so nothing outlives
/// the path's latency bound. The timeout is reported to the breaker as a
/// failure.
async fn guarded<T, Fut>(
    breaker: &CircuitBreaker,
    deadline: Instant,
    budget: Duration,
    task: Fut,
) -> LodestoneResult<T>
where
    Fut: Future<Output = LodestoneResult<T>>,
{
    breaker
        .execute(|| async move {
            match tokio::time::timeout_at(deadline, task).await {
                Ok(outcome) => outcome,
                Err(_) => Err(UpstreamError::Timeout {
                    dependency: breaker.name().to_string(),
                    timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
                }
                .into()),
            }
        })
        .await
}

fn settle(
    path: PathKind,
    outcome: LodestoneResult<Vec<EvidenceFragment>>,
    latency: Duration,
) -> RetrievalResult {
    match outcome {
        Ok(items) => {
            debug!(path = %path, items = items.len(), latency_ms = latency.as_millis() as u64, "path succeeded");
            RetrievalResult::success(path, items, latency)
        }
        Err(err) => {
            let reason = failure_reason(path, &err);
            events::path_degraded(path.as_str(), &err.to_string(), latency.as_millis() as u64);
            RetrievalResult::failure(path, reason, latency)
        }
    }
}

fn failure_reason(path: PathKind, err: &LodestoneError) -> FailureReason {
    match err {
        LodestoneError::Upstream(upstream) => FailureReason::from(upstream),
        other => FailureReason::Error {
            dependency: path.dependency().to_string(),
            message: other.to_string(),
        },
    }
}
