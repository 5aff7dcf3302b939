//! JSON-over-HTTP transport shared by the collaborator clients.
//!
//! One POST per call, no retry. The breaker and the per-path deadline own
//! failure policy, so every transport problem is reported once as
//! `UpstreamError::Failed` against the named dependency.

use std::time::Duration;

use lodestone_core::errors::{LodestoneError, LodestoneResult, UpstreamError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Longest slice of an error body kept in the failure reason.
const MAX_ERROR_BODY: usize = 256;

#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    dependency: String,
    endpoint: String,
    http: reqwest::Client,
}

impl JsonClient {
    pub(crate) fn new(
        dependency: &str,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> LodestoneResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| LodestoneError::ConfigError(format!("{dependency} client: {e}")))?;
        Ok(Self {
            dependency: dependency.to_string(),
            endpoint: endpoint.into(),
            http,
        })
    }

    pub(crate) fn dependency(&self) -> &str {
        &self.dependency
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) async fn post<Req, Resp>(&self, payload: &Req) -> LodestoneResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(self.failed(format!("HTTP {status}: {body}")));
        }

        resp.json::<Resp>()
            .await
            .map_err(|e| self.failed(format!("deserialization failed: {e}")))
    }

    pub(crate) fn failed(&self, reason: String) -> LodestoneError {
        UpstreamError::Failed {
            dependency: self.dependency.clone(),
            reason,
        }
        .into()
    }
}
