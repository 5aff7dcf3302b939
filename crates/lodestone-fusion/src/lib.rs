//! # lodestone-fusion
//!
//! Combines the two scored retrieval paths into one [`FusionResult`]
//! (`lodestone_core::models::FusionResult`) under a selectable strategy.
//!
//! - `strategies`: closed enum mapped to a function table
//! - `citations`: regulation identifier detection (reliability prior input)
//! - `quality`: agreement-aware quality score
//! - `merge`: deduplicated, contribution-weighted fused context
//! - `engine`: [`FusionEngine`], ties it together

pub mod citations;
pub mod engine;
pub mod merge;
pub mod quality;
pub mod strategies;

pub use engine::FusionEngine;
pub use strategies::{Blend, PathSignals};
