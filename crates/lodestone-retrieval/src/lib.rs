//! # lodestone-retrieval
//!
//! Runs the vector and graph retrieval paths concurrently, each behind its
//! circuit breaker and latency bound, and scores each path's evidence into
//! a comparable confidence.

pub mod orchestrator;
pub mod scoring;

pub use orchestrator::{ParallelRetriever, RetrievalPair};
pub use scoring::ConfidenceScorer;
