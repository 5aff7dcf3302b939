//! Collaborators behind the pipeline: HTTP clients for the retrieval
//! backends, the embedding service and the generator, plus the local
//! extractive digest.

mod backend;
mod client;
mod digest;
mod embedder;
mod generator;

pub use backend::HttpBackend;
pub use digest::ExtractiveDigest;
pub use embedder::HttpEmbedder;
pub use generator::HttpGenerator;
