/// Lodestone system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Breaker name guarding the semantic (vector) index.
pub const VECTOR_STORE: &str = "vector_store";

/// Breaker name guarding the structured (graph) store.
pub const GRAPH_STORE: &str = "graph_store";

/// Breaker name guarding the language-generation collaborator.
pub const LANGUAGE_MODEL: &str = "language_model";

/// Breaker name guarding the query-embedding collaborator.
pub const EMBEDDING_SERVICE: &str = "embedding_service";

/// Every protected dependency, in registry order.
pub const ALL_DEPENDENCIES: [&str; 4] = [VECTOR_STORE, GRAPH_STORE, LANGUAGE_MODEL, EMBEDDING_SERVICE];

/// Tolerance used when checking that weights or contributions sum to one.
pub const WEIGHT_EPSILON: f64 = 1e-6;
