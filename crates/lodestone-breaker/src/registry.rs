//! Process-wide set of breakers, one per dependency name.

use std::collections::BTreeMap;
use std::sync::Arc;

use lodestone_core::config::BreakersConfig;
use lodestone_core::constants::ALL_DEPENDENCIES;
use lodestone_core::errors::{LodestoneError, LodestoneResult};
use lodestone_core::models::BreakerSnapshot;

use crate::breaker::CircuitBreaker;

/// Owns the breakers shared by every request.
///
/// Built once at startup and handed around behind an `Arc`; the map itself
/// is immutable after construction, only breaker internals change.
#[derive(Debug, Default)]
pub struct BreakerRegistry {
    breakers: BTreeMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One breaker for each of the four guarded dependencies, with
    /// per-dependency overrides applied.
    pub fn from_config(config: &BreakersConfig) -> Self {
        let mut registry = Self::new();
        for name in ALL_DEPENDENCIES {
            registry.insert(CircuitBreaker::new(name, config.for_dependency(name)));
        }
        registry
    }

    /// Add or replace a breaker under its own name.
    pub fn insert(&mut self, breaker: CircuitBreaker) -> Arc<CircuitBreaker> {
        let breaker = Arc::new(breaker);
        self.breakers
            .insert(breaker.name().to_string(), Arc::clone(&breaker));
        breaker
    }

    pub fn get(&self, name: &str) -> Option<Arc<CircuitBreaker>> {
        self.breakers.get(name).cloned()
    }

    /// Like [`get`](Self::get) but a missing breaker is a wiring mistake.
    pub fn require(&self, name: &str) -> LodestoneResult<Arc<CircuitBreaker>> {
        self.get(name).ok_or_else(|| {
            LodestoneError::ConfigError(format!("no circuit breaker registered for {name}"))
        })
    }

    /// Snapshots of every breaker, ordered by name.
    pub fn snapshots(&self) -> Vec<BreakerSnapshot> {
        self.breakers.values().map(|b| b.current_state()).collect()
    }

    pub fn reset_all(&self) {
        for breaker in self.breakers.values() {
            breaker.reset();
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.breakers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}
