//! Thread-safe circuit breaker guarding one external dependency.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use lodestone_core::config::BreakerConfig;
use lodestone_core::errors::{LodestoneResult, UpstreamError};
use lodestone_core::models::{BreakerSnapshot, BreakerStatus};
use lodestone_observability::events;

use crate::state::{Admission, BreakerState, Permit, Transition};

/// Circuit breaker for a single named dependency.
///
/// State is shared by every request through a mutex that is never held
/// across an await point. Elapsed time is read from the tokio clock so
/// paused-time tests drive the OPEN timeout deterministically.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: BreakerConfig) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(BreakerState::new(config)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> BreakerConfig {
        *self.lock().config()
    }

    /// Run `call` through the breaker.
    ///
    /// Rejected calls fail fast with [`UpstreamError::Unavailable`] without
    /// invoking `call`. Caller errors (bad input) pass through without
    /// touching the failure history. If the returned future is dropped
    /// before completion the permit is released and no outcome is counted.
    pub async fn execute<F, Fut, T>(&self, call: F) -> LodestoneResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LodestoneResult<T>>,
    {
        let guard = self.try_acquire()?;
        let outcome = call().await;
        match &outcome {
            Ok(_) => guard.success(),
            Err(e) if e.is_caller_error() => drop(guard),
            Err(_) => guard.failure(),
        }
        outcome
    }

    /// Ask for admission without running anything.
    pub fn try_acquire(&self) -> Result<PermitGuard<'_>, UpstreamError> {
        let admission = {
            let mut state = self.lock();
            let (admission, transition) = state.admit(now());
            if let Some(t) = transition {
                self.log_transition(t, &state);
            }
            admission
        };
        match admission {
            Admission::Allowed(permit) => Ok(PermitGuard {
                breaker: self,
                permit: Some(permit),
            }),
            Admission::Rejected => {
                events::breaker_rejected(&self.name);
                Err(UpstreamError::Unavailable {
                    dependency: self.name.clone(),
                })
            }
        }
    }

    /// Current state as reported at the health boundary.
    pub fn current_state(&self) -> BreakerSnapshot {
        self.lock().snapshot(&self.name, now())
    }

    pub fn status(&self) -> BreakerStatus {
        self.lock().status(now())
    }

    pub fn is_open(&self) -> bool {
        self.status() == BreakerStatus::Open
    }

    /// Force CLOSED. Intended for operators and tests.
    pub fn reset(&self) {
        self.lock().reset();
        events::breaker_reset(&self.name);
    }

    fn record_success(&self, permit: Permit) {
        let mut state = self.lock();
        if let Some(t) = state.on_success(permit) {
            self.log_transition(t, &state);
        }
    }

    fn record_failure(&self, permit: Permit) {
        let mut state = self.lock();
        if let Some(t) = state.on_failure(permit, now()) {
            self.log_transition(t, &state);
        }
    }

    fn release(&self, permit: Permit) {
        self.lock().release(permit);
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_transition(&self, transition: Transition, state: &BreakerState) {
        let timeout_ms = u64::try_from(state.current_timeout().as_millis()).unwrap_or(u64::MAX);
        match transition {
            Transition::Opened | Transition::Reopened => events::breaker_opened(
                &self.name,
                state.consecutive_failures(),
                timeout_ms,
                transition == Transition::Reopened,
            ),
            Transition::HalfOpened => events::breaker_half_opened(&self.name),
            Transition::Closed => events::breaker_closed(&self.name),
        }
    }
}

/// An admitted call. Report its outcome with [`success`](Self::success) or
/// [`failure`](Self::failure); dropping it unreported frees any trial slot.
#[derive(Debug)]
pub struct PermitGuard<'a> {
    breaker: &'a CircuitBreaker,
    permit: Option<Permit>,
}

impl PermitGuard<'_> {
    pub fn success(mut self) {
        if let Some(permit) = self.permit.take() {
            self.breaker.record_success(permit);
        }
    }

    pub fn failure(mut self) {
        if let Some(permit) = self.permit.take() {
            self.breaker.record_failure(permit);
        }
    }
}

impl Drop for PermitGuard<'_> {
    fn drop(&mut self) {
        if let Some(permit) = self.permit.take() {
            self.breaker.release(permit);
        }
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
