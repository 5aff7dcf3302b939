use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::LodestoneResult;
use crate::models::EvidenceFragment;

/// What a retrieval backend is asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Precomputed query embedding, when an embedding collaborator is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub limit: usize,
}

/// A retrieval backend: the semantic index or the structured graph store.
///
/// Fault and latency injection in tests is done by substituting this trait,
/// never by patching orchestrator state.
#[async_trait]
pub trait IRetrievalBackend: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Return evidence fragments ranked by the backend.
    async fn search(&self, request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>>;
}
