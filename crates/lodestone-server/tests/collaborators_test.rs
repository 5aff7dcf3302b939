//! HTTP collaborator clients against an in-process fake upstream.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use lodestone_core::config::LodestoneConfig;
use lodestone_core::errors::{LodestoneError, UpstreamError};
use lodestone_core::models::{GenerationRequest, PathKind, TemplateType};
use lodestone_core::traits::{IQueryEmbedder, IResponseGenerator, IRetrievalBackend, SearchRequest};
use lodestone_core::Confidence;
use lodestone_server::collaborators::{HttpBackend, HttpEmbedder, HttpGenerator};
use lodestone_server::{build_state, router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

const TIMEOUT: Duration = Duration::from_secs(5);

fn upstream() -> Router {
    Router::new()
        .route(
            "/search",
            post(|Json(req): Json<SearchRequest>| async move {
                let embedded = req.embedding.map(|e| e.len()).unwrap_or(0);
                Json(json!({
                    "results": [{
                        "content": format!("{} limit {} embedded {}", req.query, req.limit, embedded),
                        "score": 0.9,
                        "citation": "30 CFR 75.380",
                    }]
                }))
            }),
        )
        .route(
            "/graph",
            post(|| async {
                Json(json!({
                    "fragments": [
                        { "id": "g-1", "content": "Escapeways shall be maintained (30 CFR 75.380).", "relevance": 0.8 },
                        { "id": "g-2", "content": "Escapeway maps are posted.", "relevance": 0.7 },
                    ]
                }))
            }),
        )
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", post(|| async { "not json" }))
        .route(
            "/embed",
            post(|| async { Json(json!({ "embedding": [0.1, 0.2, 0.3] })) }),
        )
        .route(
            "/embed-empty",
            post(|| async { Json(json!({ "embedding": [] })) }),
        )
        .route(
            "/generate",
            post(|Json(req): Json<GenerationRequest>| async move {
                Json(json!({
                    "response": format!(
                        "{} fragments, template {}",
                        req.fused_context.len(),
                        req.template_type
                    )
                }))
            }),
        )
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn search(query: &str) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        embedding: Some(vec![0.5; 4]),
        limit: 3,
    }
}

fn assert_failed(err: LodestoneError, dependency: &str, needle: &str) {
    match err {
        LodestoneError::Upstream(UpstreamError::Failed {
            dependency: dep,
            reason,
        }) => {
            assert_eq!(dep, dependency);
            assert!(reason.contains(needle), "{reason}");
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
}

// ── Retrieval backend ───────────────────────────────────────────────

#[tokio::test]
async fn backend_posts_search_request() {
    let base = serve(upstream()).await;
    let backend = HttpBackend::new(PathKind::Vector, format!("{base}/search"), TIMEOUT).unwrap();

    let fragments = backend.search(&search("escapeways")).await.unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].content, "escapeways limit 3 embedded 4");
    assert_eq!(fragments[0].relevance, 0.9);
    assert_eq!(fragments[0].citation.as_deref(), Some("30 CFR 75.380"));
    assert_eq!(backend.name(), "vector-http");
}

#[tokio::test]
async fn backend_error_status_is_upstream_failure() {
    let base = serve(upstream()).await;
    let backend = HttpBackend::new(PathKind::Graph, format!("{base}/broken"), TIMEOUT).unwrap();

    let err = backend.search(&search("x")).await.unwrap_err();
    assert_failed(err, "graph_store", "500");
}

#[tokio::test]
async fn backend_bad_payload_is_upstream_failure() {
    let base = serve(upstream()).await;
    let backend = HttpBackend::new(PathKind::Graph, format!("{base}/garbage"), TIMEOUT).unwrap();

    let err = backend.search(&search("x")).await.unwrap_err();
    assert_failed(err, "graph_store", "deserialization failed");
}

#[tokio::test]
async fn unreachable_backend_is_upstream_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpBackend::new(PathKind::Vector, format!("http://{addr}/search"), TIMEOUT).unwrap();

    let err = backend.search(&search("x")).await.unwrap_err();
    assert!(matches!(
        err,
        LodestoneError::Upstream(UpstreamError::Failed { ref dependency, .. }) if dependency == "vector_store"
    ));
}

// ── Embedder / generator ────────────────────────────────────────────

#[tokio::test]
async fn embedder_returns_vector_and_rejects_empty() {
    let base = serve(upstream()).await;

    let embedder = HttpEmbedder::new(format!("{base}/embed"), TIMEOUT).unwrap();
    assert_eq!(embedder.embed("dust").await.unwrap(), vec![0.1, 0.2, 0.3]);

    let empty = HttpEmbedder::new(format!("{base}/embed-empty"), TIMEOUT).unwrap();
    assert_failed(empty.embed("dust").await.unwrap_err(), "embedding_service", "empty");
}

#[tokio::test]
async fn generator_forwards_template_and_context() {
    let base = serve(upstream()).await;
    let generator = HttpGenerator::new(format!("{base}/generate"), TIMEOUT).unwrap();

    let request = GenerationRequest {
        query: "escapeways".into(),
        session_id: None,
        template_type: TemplateType::ComparativeAnalysis,
        fused_context: Vec::new(),
        vector_confidence: Confidence::new(0.5),
        graph_confidence: Confidence::new(0.4),
        final_confidence: Confidence::new(0.46),
        degraded_paths: Vec::new(),
    };
    let text = generator.generate(&request).await.unwrap();
    assert_eq!(text, "0 fragments, template comparative_analysis");
    assert_eq!(generator.name(), "language_model");
}

// ── Assembled service ───────────────────────────────────────────────

#[tokio::test]
async fn configured_service_answers_over_http_collaborators() {
    let base = serve(upstream()).await;
    let mut config = LodestoneConfig::default();
    config.server.vector_endpoint = Some(format!("{base}/search"));
    config.server.graph_endpoint = Some(format!("{base}/graph"));
    config.server.embedding_endpoint = Some(format!("{base}/embed"));
    config.server.generator_endpoint = Some(format!("{base}/generate"));

    let app = router(build_state(&config).unwrap());
    let body = json!({
        "user_input": "How must escapeways be maintained?",
        "fusion_strategy": "weighted_linear",
        "template_type": "basic_hybrid",
    });
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate_parallel_hybrid")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["response"], "3 fragments, template basic_hybrid");
    assert_eq!(body["fusion_strategy"], "weighted_linear");
    assert_eq!(body["fusion_ready"], true);
}
