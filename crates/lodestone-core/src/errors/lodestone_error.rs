use super::{FusionError, InputError, UpstreamError};

/// Crate-wide result alias.
pub type LodestoneResult<T> = Result<T, LodestoneError>;

/// Top-level error for the Lodestone service.
#[derive(Debug, thiserror::Error)]
pub enum LodestoneError {
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("fusion error: {0}")]
    Fusion(#[from] FusionError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("no usable result: {reason}")]
    NoUsableResult { reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LodestoneError {
    /// Caller errors are reported synchronously and never touch breaker state.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Fusion(FusionError::InvalidStrategy { .. })
        )
    }

    /// Whether this is the breaker refusing a call.
    pub fn is_breaker_rejection(&self) -> bool {
        matches!(self, Self::Upstream(UpstreamError::Unavailable { .. }))
    }
}
