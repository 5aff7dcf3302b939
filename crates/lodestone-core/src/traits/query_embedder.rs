use async_trait::async_trait;

use crate::errors::LodestoneResult;

/// Query embedding collaborator used ahead of the vector search.
#[async_trait]
pub trait IQueryEmbedder: Send + Sync {
    fn name(&self) -> &str;

    async fn embed(&self, text: &str) -> LodestoneResult<Vec<f32>>;
}
