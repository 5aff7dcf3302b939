//! Wire configured collaborators, breakers, and engines into [`AppState`].

use std::sync::Arc;
use std::time::Duration;

use lodestone_breaker::BreakerRegistry;
use lodestone_core::config::LodestoneConfig;
use lodestone_core::errors::{LodestoneError, LodestoneResult};
use lodestone_core::models::PathKind;
use lodestone_core::traits::IResponseGenerator;
use lodestone_fusion::FusionEngine;
use lodestone_retrieval::{ConfidenceScorer, ParallelRetriever};
use tracing::info;

use crate::collaborators::{ExtractiveDigest, HttpBackend, HttpEmbedder, HttpGenerator};
use crate::http::AppState;
use crate::pipeline::HybridPipeline;

/// Build the full application from config. Both retrieval endpoints are
/// required; the embedder and generator are optional. Every breaker starts
/// CLOSED.
pub fn build_state(config: &LodestoneConfig) -> LodestoneResult<AppState> {
    let server = &config.server;
    let timeout = Duration::from_millis(server.client_timeout_ms);
    let registry = Arc::new(BreakerRegistry::from_config(&config.breaker));

    let vector = HttpBackend::new(
        PathKind::Vector,
        required(&server.vector_endpoint, "server.vector_endpoint")?,
        timeout,
    )?;
    let graph = HttpBackend::new(
        PathKind::Graph,
        required(&server.graph_endpoint, "server.graph_endpoint")?,
        timeout,
    )?;

    let mut retriever = ParallelRetriever::new(
        &registry,
        Arc::new(vector),
        Arc::new(graph),
        config.retrieval.clone(),
        ConfidenceScorer::new(config.scoring.clone()),
    )?;
    if let Some(endpoint) = &server.embedding_endpoint {
        let embedder = HttpEmbedder::new(endpoint, timeout)?;
        retriever = retriever.with_embedder(&registry, Arc::new(embedder))?;
    }

    let generator: Arc<dyn IResponseGenerator> = match &server.generator_endpoint {
        Some(endpoint) => Arc::new(HttpGenerator::new(endpoint, timeout)?),
        None => Arc::new(ExtractiveDigest::default()),
    };

    let fusion = FusionEngine::new(config.fusion.clone())?;
    info!(
        default_strategy = %fusion.default_strategy(),
        generator = generator.name(),
        breakers = registry.len(),
        "pipeline assembled"
    );

    let pipeline = HybridPipeline::new(retriever, fusion, generator, &registry, config)?;
    Ok(AppState::new(pipeline, registry))
}

fn required<'a>(endpoint: &'a Option<String>, field: &str) -> LodestoneResult<&'a str> {
    endpoint
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| LodestoneError::ConfigError(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LodestoneConfig {
        let mut config = LodestoneConfig::default();
        config.server.vector_endpoint = Some("http://127.0.0.1:9001/search".into());
        config.server.graph_endpoint = Some("http://127.0.0.1:9002/query".into());
        config
    }

    #[test]
    fn builds_with_required_endpoints() {
        let state = build_state(&config()).unwrap();
        assert_eq!(state.registry.len(), 4);
    }

    #[test]
    fn missing_graph_endpoint_is_config_error() {
        let mut config = config();
        config.server.graph_endpoint = None;
        let err = build_state(&config).err().unwrap();
        assert!(err.to_string().contains("server.graph_endpoint"));
    }

    #[test]
    fn example_config_assembles() {
        let raw = include_str!("../../../lodestone.example.toml");
        let config = LodestoneConfig::from_toml(raw).unwrap();
        config.validate().unwrap();
        assert_eq!(config.breaker.for_dependency("language_model").failure_threshold, 3);
        assert!(build_state(&config).is_ok());
    }

    #[test]
    fn optional_collaborators_are_accepted() {
        let mut config = config();
        config.server.embedding_endpoint = Some("http://127.0.0.1:9003/embed".into());
        config.server.generator_endpoint = Some("http://127.0.0.1:9004/generate".into());
        assert!(build_state(&config).is_ok());
    }
}
