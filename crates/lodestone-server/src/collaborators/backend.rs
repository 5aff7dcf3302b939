//! Retrieval backend reached over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use lodestone_core::errors::LodestoneResult;
use lodestone_core::models::{EvidenceFragment, PathKind};
use lodestone_core::traits::{IRetrievalBackend, SearchRequest};
use serde::Deserialize;

use super::client::JsonClient;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(alias = "fragments")]
    results: Vec<EvidenceFragment>,
}

/// POSTs the [`SearchRequest`] as JSON and expects
/// `{"results": [{"id"?, "content", "relevance"|"score", "citation"?}]}`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    name: String,
    client: JsonClient,
}

impl HttpBackend {
    pub fn new(path: PathKind, endpoint: impl Into<String>, timeout: Duration) -> LodestoneResult<Self> {
        let client = JsonClient::new(path.dependency(), endpoint, timeout)?;
        Ok(Self {
            name: format!("{path}-http"),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl IRetrievalBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        let response: SearchResponse = self.client.post(request).await?;
        Ok(response.results)
    }
}
