/// Failures of an external dependency call.
///
/// All three variants count against the dependency's breaker except
/// `Unavailable`, which is the breaker itself refusing the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    #[error("{dependency} unavailable: circuit open")]
    Unavailable { dependency: String },

    #[error("{dependency} timed out after {timeout_ms} ms")]
    Timeout { dependency: String, timeout_ms: u64 },

    #[error("{dependency} failed: {reason}")]
    Failed { dependency: String, reason: String },
}

impl UpstreamError {
    /// Name of the dependency that failed.
    pub fn dependency(&self) -> &str {
        match self {
            Self::Unavailable { dependency }
            | Self::Timeout { dependency, .. }
            | Self::Failed { dependency, .. } => dependency,
        }
    }
}
