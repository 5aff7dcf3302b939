use serde::{Deserialize, Serialize};

use super::{Confidence, FusedFragment, PathKind, TemplateType};

/// Everything the generation collaborator receives for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub template_type: TemplateType,
    pub fused_context: Vec<FusedFragment>,
    pub vector_confidence: Confidence,
    pub graph_confidence: Confidence,
    pub final_confidence: Confidence,
    /// Paths that failed; templates may explain the reduced capability.
    pub degraded_paths: Vec<PathKind>,
}
