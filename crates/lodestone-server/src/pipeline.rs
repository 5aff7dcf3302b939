//! Answer pipeline: validate, retrieve both paths, fuse, then answer,
//! redirect, or refuse.

use std::sync::Arc;

use lodestone_breaker::{BreakerRegistry, CircuitBreaker};
use lodestone_core::config::{GenerationConfig, LodestoneConfig, ThresholdConfig};
use lodestone_core::constants::LANGUAGE_MODEL;
use lodestone_core::errors::{LodestoneError, LodestoneResult, UpstreamError};
use lodestone_core::models::{
    FusionResult, FusionStrategy, GenerationRequest, PathKind, Query, TemplateType,
};
use lodestone_core::traits::IResponseGenerator;
use lodestone_fusion::FusionEngine;
use lodestone_observability::{events, query_span};
use lodestone_retrieval::ParallelRetriever;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{info, Instrument};

use crate::collaborators::ExtractiveDigest;
use crate::notices;

// ── Request / Response types ────────────────────────────────────────

/// Body of `POST /generate_parallel_hybrid`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub user_input: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Unknown or missing names fall back to the configured default.
    #[serde(default)]
    pub fusion_strategy: Option<String>,
    #[serde(default)]
    pub template_type: Option<String>,
}

impl AnswerRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            session_id: None,
            fusion_strategy: None,
            template_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub response: String,
    pub vector_confidence: f64,
    pub graph_confidence: f64,
    pub final_confidence: f64,
    pub fusion_ready: bool,
    /// Fusion-ready and at or above `thresholds.high_confidence`.
    pub high_confidence: bool,
    pub fusion_strategy: FusionStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub degraded_paths: Vec<PathKind>,
    pub processing_metadata: ProcessingMetadata,
}

/// Stage timings in seconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub total_time: f64,
    pub vector_time: f64,
    pub graph_time: f64,
    pub fusion_time: f64,
    pub template_time: f64,
}

// ── Pipeline ────────────────────────────────────────────────────────

/// Owns one query end to end. Shared across requests behind an `Arc`; the
/// only mutable state it touches is breaker state.
pub struct HybridPipeline {
    retriever: ParallelRetriever,
    fusion: FusionEngine,
    generator: Arc<dyn IResponseGenerator>,
    generator_breaker: Arc<CircuitBreaker>,
    digest: ExtractiveDigest,
    thresholds: ThresholdConfig,
    generation: GenerationConfig,
}

impl HybridPipeline {
    pub fn new(
        retriever: ParallelRetriever,
        fusion: FusionEngine,
        generator: Arc<dyn IResponseGenerator>,
        registry: &BreakerRegistry,
        config: &LodestoneConfig,
    ) -> LodestoneResult<Self> {
        Ok(Self {
            retriever,
            fusion,
            generator,
            generator_breaker: registry.require(LANGUAGE_MODEL)?,
            digest: ExtractiveDigest::default(),
            thresholds: config.thresholds.clone(),
            generation: config.generation.clone(),
        })
    }

    pub fn fusion(&self) -> &FusionEngine {
        &self.fusion
    }

    /// Answer one request.
    ///
    /// Errors are limited to caller mistakes and the case where neither
    /// path produced evidence; every other failure degrades the answer.
    pub async fn answer(&self, request: AnswerRequest) -> LodestoneResult<AnswerResponse> {
        let started = Instant::now();
        let template = parse_template(request.template_type.as_deref())?;
        let strategy = self.fusion.resolve_strategy(request.fusion_strategy.as_deref());
        let query =
            Query::new(&request.user_input, strategy, template)?.with_session(request.session_id);

        let span = query_span!(query.id(), strategy);
        self.run(query, started).instrument(span).await
    }

    async fn run(&self, query: Query, started: Instant) -> LodestoneResult<AnswerResponse> {
        let pair = self.retriever.retrieve(&query).await?;

        let fusion_started = Instant::now();
        let fused = self.fusion.fuse(query.fusion_strategy(), &pair.vector, &pair.graph);
        let fusion_time = fusion_started.elapsed();

        if fused.is_unavailable() {
            return Err(LodestoneError::NoUsableResult {
                reason: notices::NO_EVIDENCE.to_string(),
            });
        }

        let template_started = Instant::now();
        let mut response = if self.should_redirect(&fused) {
            info!(
                final_confidence = fused.final_confidence.value(),
                fusion_ready = fused.fusion_ready,
                "no relevant evidence, redirecting"
            );
            notices::DOMAIN_REDIRECT.to_string()
        } else {
            self.generate(&query, &fused).await
        };
        let template_time = template_started.elapsed();

        if let Some(note) = notices::partial_evidence_note(&fused.degraded_paths) {
            response.push_str("\n\n");
            response.push_str(&note);
        }

        Ok(AnswerResponse {
            response,
            vector_confidence: fused.vector_confidence.value(),
            graph_confidence: fused.graph_confidence.value(),
            final_confidence: fused.final_confidence.value(),
            fusion_ready: fused.fusion_ready,
            high_confidence: self.is_high_confidence(&fused),
            fusion_strategy: fused.strategy,
            session_id: query.session_id().map(str::to_string),
            degraded_paths: fused.degraded_paths,
            processing_metadata: ProcessingMetadata {
                total_time: started.elapsed().as_secs_f64(),
                vector_time: pair.vector.result.raw_latency.as_secs_f64(),
                graph_time: pair.graph.result.raw_latency.as_secs_f64(),
                fusion_time: fusion_time.as_secs_f64(),
                template_time: template_time.as_secs_f64(),
            },
        })
    }

    fn should_redirect(&self, fused: &FusionResult) -> bool {
        !fused.fusion_ready || self.thresholds.is_off_domain(fused.final_confidence.value())
    }

    fn is_high_confidence(&self, fused: &FusionResult) -> bool {
        fused.fusion_ready && self.thresholds.is_high_confidence(fused.final_confidence.value())
    }

    /// Generator behind the `language_model` breaker and generation timeout.
    /// Any failure falls back to the extractive digest.
    async fn generate(&self, query: &Query, fused: &FusionResult) -> String {
        let request = GenerationRequest {
            query: query.text().to_string(),
            session_id: query.session_id().map(str::to_string),
            template_type: query.template_type(),
            fused_context: fused.fused_context.clone(),
            vector_confidence: fused.vector_confidence,
            graph_confidence: fused.graph_confidence,
            final_confidence: fused.final_confidence,
            degraded_paths: fused.degraded_paths.clone(),
        };

        let generator = Arc::clone(&self.generator);
        let timeout = self.generation.timeout();
        let dependency = self.generator_breaker.name().to_string();
        let outcome = self
            .generator_breaker
            .execute(|| async move {
                match tokio::time::timeout(timeout, generator.generate(&request)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(UpstreamError::Timeout {
                        dependency,
                        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    }
                    .into()),
                }
            })
            .await;

        match outcome {
            Ok(text) => text,
            Err(err) => {
                events::generation_fallback(self.generator.name(), &err.to_string());
                format!(
                    "{}\n\n{}",
                    notices::GENERATION_UNAVAILABLE,
                    self.digest.render(&fused.fused_context)
                )
            }
        }
    }
}

fn parse_template(name: Option<&str>) -> LodestoneResult<TemplateType> {
    match name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => Ok(name.parse()?),
        None => Ok(TemplateType::default()),
    }
}
