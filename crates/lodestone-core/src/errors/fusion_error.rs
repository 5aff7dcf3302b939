/// Fusion subsystem errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FusionError {
    #[error("invalid fusion strategy: {name}")]
    InvalidStrategy { name: String },

    #[error("fusion weights must be non-negative and sum to 1.0: vector {vector}, graph {graph}")]
    InvalidWeights { vector: f64, graph: f64 },
}
