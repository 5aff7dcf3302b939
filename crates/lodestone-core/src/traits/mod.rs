mod query_embedder;
mod response_generator;
mod retrieval_backend;

pub use query_embedder::IQueryEmbedder;
pub use response_generator::IResponseGenerator;
pub use retrieval_backend::{IRetrievalBackend, SearchRequest};
