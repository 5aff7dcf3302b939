//! Local extractive answer built from the fused context alone.

use std::fmt::Write;

use async_trait::async_trait;
use lodestone_core::errors::LodestoneResult;
use lodestone_core::models::{FusedFragment, GenerationRequest};
use lodestone_core::traits::IResponseGenerator;

const DEFAULT_MAX_FRAGMENTS: usize = 5;

/// Lists the top fused fragments verbatim with their citations. Used as the
/// generator when none is configured, and as the fallback when the
/// configured one fails.
#[derive(Debug, Clone)]
pub struct ExtractiveDigest {
    max_fragments: usize,
}

impl ExtractiveDigest {
    pub fn new(max_fragments: usize) -> Self {
        Self {
            max_fragments: max_fragments.max(1),
        }
    }

    pub fn render(&self, context: &[FusedFragment]) -> String {
        if context.is_empty() {
            return "No regulatory evidence was retrieved for this question.".to_string();
        }
        let mut out = String::from("Relevant regulatory evidence:");
        for (rank, fused) in context.iter().take(self.max_fragments).enumerate() {
            let _ = write!(out, "\n{}. ", rank + 1);
            if let Some(citation) = &fused.fragment.citation {
                let _ = write!(out, "[{citation}] ");
            }
            out.push_str(fused.fragment.content.trim());
        }
        out
    }
}

impl Default for ExtractiveDigest {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAGMENTS)
    }
}

#[async_trait]
impl IResponseGenerator for ExtractiveDigest {
    fn name(&self) -> &str {
        "extractive-digest"
    }

    async fn generate(&self, request: &GenerationRequest) -> LodestoneResult<String> {
        Ok(self.render(&request.fused_context))
    }
}
