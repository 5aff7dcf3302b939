use async_trait::async_trait;

use crate::errors::LodestoneResult;
use crate::models::GenerationRequest;

/// Natural-language answer generation over a fused context.
#[async_trait]
pub trait IResponseGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> LodestoneResult<String>;
}
