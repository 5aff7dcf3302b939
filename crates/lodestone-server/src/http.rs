//! HTTP endpoints.
//!
//! - POST /generate_parallel_hybrid  - answer one question
//! - GET  /parallel_hybrid/health    - breaker-derived health with detail
//! - GET  /health                    - coarse liveness

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lodestone_breaker::BreakerRegistry;
use lodestone_core::errors::InputError;
use lodestone_core::models::{HealthReport, HealthStatus};
use lodestone_observability::health::{liveness_status, HealthAggregator};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pipeline::{AnswerRequest, AnswerResponse, HybridPipeline};

/// Shared handler state. Cloned per request; everything behind it is `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<HybridPipeline>,
    pub registry: Arc<BreakerRegistry>,
    pub health: Arc<HealthAggregator>,
}

impl AppState {
    pub fn new(pipeline: HybridPipeline, registry: Arc<BreakerRegistry>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            registry,
            health: Arc::new(HealthAggregator::default()),
        }
    }

    pub fn health_report(&self) -> HealthReport {
        self.health.report(self.registry.snapshots())
    }
}

/// Build the axum router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate_parallel_hybrid", post(generate))
        .route("/parallel_hybrid/health", get(hybrid_health))
        .route("/health", get(liveness))
        .with_state(state)
}

// ── Response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: HealthStatus,
}

// ── Handlers ────────────────────────────────────────────────────────

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    // Extractor rejections become 400 `{error}`.
    let Json(req) = payload.map_err(|rejection| {
        ApiError(
            InputError::MalformedBody {
                reason: rejection.body_text(),
            }
            .into(),
        )
    })?;
    let answer = state.pipeline.answer(req).await?;
    Ok(Json(answer))
}

async fn hybrid_health(State(state): State<AppState>) -> Response {
    let report = state.health_report();
    let status = match report.status {
        HealthStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (status, Json(report)).into_response()
}

async fn liveness(State(state): State<AppState>) -> Json<LivenessResponse> {
    let report = state.health_report();
    Json(LivenessResponse {
        status: liveness_status(report.status),
    })
}
