//! # lodestone-core
//!
//! Foundation crate for the Lodestone hybrid retrieval service.
//! Defines all shared types, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LodestoneConfig;
pub use errors::{LodestoneError, LodestoneResult};
pub use models::{
    Confidence, EvidenceFragment, FusionResult, FusionStrategy, PathKind, Query, RetrievalResult,
    ScoredResult, TemplateType,
};
