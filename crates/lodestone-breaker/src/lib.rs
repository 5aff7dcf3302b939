//! # lodestone-breaker
//!
//! Circuit breakers guarding each external dependency.
//!
//! `state` holds the pure CLOSED / OPEN / HALF_OPEN transition logic with
//! explicit instants; `breaker` serializes it behind one mutex per instance
//! and wraps calls; `registry` owns one breaker per dependency name.

pub mod breaker;
pub mod registry;
pub mod state;

pub use breaker::{CircuitBreaker, PermitGuard};
pub use registry::BreakerRegistry;
pub use state::{Admission, BreakerState, Permit, Transition};
