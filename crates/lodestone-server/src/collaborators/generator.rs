//! Language-generation collaborator reached over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use lodestone_core::constants::LANGUAGE_MODEL;
use lodestone_core::errors::LodestoneResult;
use lodestone_core::models::GenerationRequest;
use lodestone_core::traits::IResponseGenerator;
use serde::Deserialize;

use super::client::JsonClient;

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(alias = "answer")]
    response: String,
}

/// POSTs the [`GenerationRequest`] and expects `{"response": "..."}`.
/// The template type travels in the request; prompt rendering is the
/// collaborator's concern.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: JsonClient,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LodestoneResult<Self> {
        Ok(Self {
            client: JsonClient::new(LANGUAGE_MODEL, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl IResponseGenerator for HttpGenerator {
    fn name(&self) -> &str {
        self.client.dependency()
    }

    async fn generate(&self, request: &GenerationRequest) -> LodestoneResult<String> {
        let response: GenerateResponse = self.client.post(request).await?;
        if response.response.trim().is_empty() {
            return Err(self.client.failed("empty response".to_string()));
        }
        Ok(response.response)
    }
}
