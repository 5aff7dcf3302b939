pub mod breaker_snapshot;
pub mod confidence;
pub mod evidence;
pub mod fusion_result;
pub mod generation;
pub mod health_report;
pub mod path;
pub mod query;
pub mod retrieval_result;

pub use breaker_snapshot::{BreakerSnapshot, BreakerStatus};
pub use confidence::Confidence;
pub use evidence::EvidenceFragment;
pub use fusion_result::{FusedFragment, FusionResult};
pub use generation::GenerationRequest;
pub use health_report::{HealthReport, HealthStatus};
pub use path::PathKind;
pub use query::{FusionStrategy, Query, TemplateType};
pub use retrieval_result::{FailureReason, RetrievalResult, ScoredResult};
