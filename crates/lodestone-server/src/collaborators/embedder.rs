//! Query embedding service reached over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use lodestone_core::constants::EMBEDDING_SERVICE;
use lodestone_core::errors::LodestoneResult;
use lodestone_core::traits::IQueryEmbedder;
use serde::{Deserialize, Serialize};

use super::client::JsonClient;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// POSTs `{"text": ...}` and expects `{"embedding": [f32, ...]}`.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: JsonClient,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LodestoneResult<Self> {
        Ok(Self {
            client: JsonClient::new(EMBEDDING_SERVICE, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl IQueryEmbedder for HttpEmbedder {
    fn name(&self) -> &str {
        self.client.dependency()
    }

    async fn embed(&self, text: &str) -> LodestoneResult<Vec<f32>> {
        let response: EmbedResponse = self.client.post(&EmbedRequest { text }).await?;
        if response.embedding.is_empty() {
            return Err(self.client.failed("empty embedding".to_string()));
        }
        Ok(response.embedding)
    }
}
