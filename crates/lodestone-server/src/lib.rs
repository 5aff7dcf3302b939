//! # lodestone-server
//!
//! HTTP surface for the hybrid retrieval service: the answer pipeline
//! (retrieve both paths, fuse, generate or redirect), HTTP collaborator
//! clients, and breaker-derived health endpoints.

pub mod bootstrap;
pub mod collaborators;
pub mod error;
pub mod http;
pub mod notices;
pub mod pipeline;

pub use bootstrap::build_state;
pub use error::ApiError;
pub use http::{router, AppState};
pub use pipeline::{AnswerRequest, AnswerResponse, HybridPipeline, ProcessingMetadata};
