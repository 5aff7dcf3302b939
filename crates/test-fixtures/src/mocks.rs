//! Mock collaborators substituted for the HTTP clients in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lodestone_core::errors::{LodestoneResult, UpstreamError};
use lodestone_core::models::{EvidenceFragment, GenerationRequest};
use lodestone_core::traits::{IQueryEmbedder, IResponseGenerator, IRetrievalBackend, SearchRequest};

use crate::EvidenceFixture;

/// Returns the same fragments for every query.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    name: String,
    fragments: Vec<EvidenceFragment>,
}

impl StaticBackend {
    pub fn new(name: impl Into<String>, fragments: Vec<EvidenceFragment>) -> Self {
        Self {
            name: name.into(),
            fragments,
        }
    }

    pub fn from_fixture(name: impl Into<String>, fixture: EvidenceFixture) -> Self {
        Self::new(name, fixture.fragments)
    }

    /// A backend that succeeds with no evidence.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

#[async_trait]
impl IRetrievalBackend for StaticBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        Ok(self.fragments.iter().take(request.limit).cloned().collect())
    }
}

/// Fails every call with an upstream error.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    name: String,
}

impl FailingBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl IRetrievalBackend for FailingBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        Err(UpstreamError::Failed {
            dependency: self.name.clone(),
            reason: "connection refused".to_string(),
        }
        .into())
    }
}

/// Sleeps before delegating. Uses the tokio clock, so paused-time tests
/// control it exactly.
pub struct SlowBackend<B> {
    inner: B,
    delay: Duration,
}

impl<B> SlowBackend<B> {
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<B: IRetrievalBackend> IRetrievalBackend for SlowBackend<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(&self, request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        tokio::time::sleep(self.delay).await;
        self.inner.search(request).await
    }
}

/// Never answers. Tracks how many calls are still in flight; a call stops
/// counting once its future is dropped.
#[derive(Debug, Default)]
pub struct HangingBackend {
    in_flight: Arc<AtomicUsize>,
}

impl HangingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.in_flight)
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IRetrievalBackend for HangingBackend {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn search(&self, _request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _call = InFlight(Arc::clone(&self.in_flight));
        std::future::pending::<()>().await;
        Ok(Vec::new())
    }
}

/// Counts calls and remembers the last request before delegating.
pub struct CountingBackend<B> {
    inner: B,
    calls: Arc<AtomicUsize>,
    last_request: Mutex<Option<SearchRequest>>,
}

impl<B> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Mutex::new(None),
        }
    }

    /// Shared counter, readable after the backend is moved into an `Arc<dyn ...>`.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl<B: IRetrievalBackend> IRetrievalBackend for CountingBackend<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(&self, request: &SearchRequest) -> LodestoneResult<Vec<EvidenceFragment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.inner.search(request).await
    }
}

/// Deterministic embedder: a short vector derived from the text length.
#[derive(Debug, Default, Clone)]
pub struct StaticEmbedder {
    calls: Arc<AtomicUsize>,
}

impl StaticEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl IQueryEmbedder for StaticEmbedder {
    fn name(&self) -> &str {
        "static-embedder"
    }

    async fn embed(&self, text: &str) -> LodestoneResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let len = text.len() as f32;
        Ok(vec![1.0, len, len.sqrt()])
    }
}

/// Embedder whose every call fails.
#[derive(Debug, Default, Clone)]
pub struct FailingEmbedder;

#[async_trait]
impl IQueryEmbedder for FailingEmbedder {
    fn name(&self) -> &str {
        "failing-embedder"
    }

    async fn embed(&self, _text: &str) -> LodestoneResult<Vec<f32>> {
        Err(UpstreamError::Failed {
            dependency: "embedding_service".to_string(),
            reason: "model not loaded".to_string(),
        }
        .into())
    }
}

/// Returns a fixed answer and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    answer: String,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl IResponseGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted-generator"
    }

    async fn generate(&self, request: &GenerationRequest) -> LodestoneResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.answer.clone())
    }
}

/// Generator whose every call fails.
#[derive(Debug, Default, Clone)]
pub struct FailingGenerator;

#[async_trait]
impl IResponseGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing-generator"
    }

    async fn generate(&self, _request: &GenerationRequest) -> LodestoneResult<String> {
        Err(UpstreamError::Failed {
            dependency: "language_model".to_string(),
            reason: "model overloaded".to_string(),
        }
        .into())
    }
}
