//! Pure breaker state machine.
//!
//! Every method takes the current instant explicitly so transitions can be
//! driven deterministically in tests. Callers serialize access; this type
//! has no interior mutability.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use lodestone_core::config::BreakerConfig;
use lodestone_core::models::{BreakerSnapshot, BreakerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Open {
        opened_at: Instant,
        opened_at_wall: DateTime<Utc>,
    },
    HalfOpen {
        trials_in_flight: u32,
    },
}

/// Proof that a call was admitted. Outcomes are only counted against the
/// phase that admitted them: a permit issued before the breaker changed
/// phase is stale and its outcome is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permit {
    epoch: u64,
    trial: bool,
}

impl Permit {
    /// Whether this permit holds a HALF_OPEN trial slot.
    pub fn is_trial(&self) -> bool {
        self.trial
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed(Permit),
    Rejected,
}

/// A phase change worth logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// CLOSED -> OPEN after reaching the failure threshold.
    Opened,
    /// HALF_OPEN -> OPEN after a failed trial, with a longer timeout.
    Reopened,
    /// OPEN -> HALF_OPEN after the timeout elapsed.
    HalfOpened,
    /// HALF_OPEN -> CLOSED after enough successful trials.
    Closed,
}

/// Failure and success history for one dependency.
#[derive(Debug, Clone)]
pub struct BreakerState {
    config: BreakerConfig,
    phase: Phase,
    consecutive_failures: u32,
    consecutive_successes: u32,
    current_timeout: Duration,
    epoch: u64,
}

impl BreakerState {
    /// A fresh breaker starts CLOSED.
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            phase: Phase::Closed,
            consecutive_failures: 0,
            consecutive_successes: 0,
            current_timeout: config.base_timeout(),
            epoch: 0,
        }
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Decide whether a call may proceed at `now`.
    ///
    /// An OPEN breaker whose timeout has elapsed moves to HALF_OPEN here and
    /// hands out the first trial slot.
    pub fn admit(&mut self, now: Instant) -> (Admission, Option<Transition>) {
        let mut transition = None;

        if let Phase::Open { opened_at, .. } = self.phase {
            if now.saturating_duration_since(opened_at) < self.current_timeout {
                return (Admission::Rejected, None);
            }
            self.enter(Phase::HalfOpen {
                trials_in_flight: 0,
            });
            self.consecutive_successes = 0;
            transition = Some(Transition::HalfOpened);
        }

        let admission = match &mut self.phase {
            Phase::Closed => Admission::Allowed(Permit {
                epoch: self.epoch,
                trial: false,
            }),
            Phase::HalfOpen { trials_in_flight } => {
                if *trials_in_flight < self.config.trial_slots() {
                    *trials_in_flight += 1;
                    Admission::Allowed(Permit {
                        epoch: self.epoch,
                        trial: true,
                    })
                } else {
                    Admission::Rejected
                }
            }
            Phase::Open { .. } => Admission::Rejected,
        };
        (admission, transition)
    }

    /// Record a successful call.
    pub fn on_success(&mut self, permit: Permit) -> Option<Transition> {
        if permit.epoch != self.epoch {
            return None;
        }
        match &mut self.phase {
            Phase::Closed => {
                self.consecutive_failures = 0;
                self.consecutive_successes = self.consecutive_successes.saturating_add(1);
                None
            }
            Phase::HalfOpen { trials_in_flight } => {
                if permit.trial {
                    *trials_in_flight = trials_in_flight.saturating_sub(1);
                }
                self.consecutive_successes = self.consecutive_successes.saturating_add(1);
                if self.consecutive_successes >= self.config.success_threshold {
                    self.enter(Phase::Closed);
                    self.consecutive_failures = 0;
                    self.consecutive_successes = 0;
                    Some(Transition::Closed)
                } else {
                    None
                }
            }
            Phase::Open { .. } => None,
        }
    }

    /// Record a failed call (error, timeout, or explicit failure result).
    pub fn on_failure(&mut self, permit: Permit, now: Instant) -> Option<Transition> {
        if permit.epoch != self.epoch {
            return None;
        }
        match self.phase {
            Phase::Closed => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.consecutive_successes = 0;
                if self.consecutive_failures >= self.config.failure_threshold {
                    self.current_timeout = self.config.base_timeout();
                    self.open(now);
                    Some(Transition::Opened)
                } else {
                    None
                }
            }
            Phase::HalfOpen { .. } => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.consecutive_successes = 0;
                self.current_timeout = self.backed_off_timeout();
                self.open(now);
                Some(Transition::Reopened)
            }
            Phase::Open { .. } => None,
        }
    }

    /// Give back a permit whose call never reported an outcome.
    pub fn release(&mut self, permit: Permit) {
        if permit.epoch != self.epoch || !permit.trial {
            return;
        }
        if let Phase::HalfOpen { trials_in_flight } = &mut self.phase {
            *trials_in_flight = trials_in_flight.saturating_sub(1);
        }
    }

    /// Force CLOSED with zero counters and the base timeout.
    pub fn reset(&mut self) {
        self.enter(Phase::Closed);
        self.consecutive_failures = 0;
        self.consecutive_successes = 0;
        self.current_timeout = self.config.base_timeout();
    }

    /// State as observed at `now`, without mutating anything.
    ///
    /// An OPEN breaker whose timeout has elapsed reports HALF_OPEN: that is
    /// the phase the next call will find it in.
    pub fn status(&self, now: Instant) -> BreakerStatus {
        match self.phase {
            Phase::Closed => BreakerStatus::Closed,
            Phase::HalfOpen { .. } => BreakerStatus::HalfOpen,
            Phase::Open { opened_at, .. } => {
                if now.saturating_duration_since(opened_at) >= self.current_timeout {
                    BreakerStatus::HalfOpen
                } else {
                    BreakerStatus::Open
                }
            }
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn consecutive_successes(&self) -> u32 {
        self.consecutive_successes
    }

    pub fn current_timeout(&self) -> Duration {
        self.current_timeout
    }

    /// Diagnostic view for the health boundary.
    pub fn snapshot(&self, name: &str, now: Instant) -> BreakerSnapshot {
        let state = self.status(now);
        let (opened_at, consecutive_successes) = match (self.phase, state) {
            (Phase::Open { opened_at_wall, .. }, BreakerStatus::Open) => {
                (Some(opened_at_wall), self.consecutive_successes)
            }
            // Lazily half-open: the success counter resets on entry.
            (Phase::Open { .. }, _) => (None, 0),
            _ => (None, self.consecutive_successes),
        };
        BreakerSnapshot {
            name: name.to_string(),
            state,
            consecutive_failures: self.consecutive_failures,
            consecutive_successes,
            opened_at,
            current_timeout_ms: u64::try_from(self.current_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    fn open(&mut self, now: Instant) {
        self.enter(Phase::Open {
            opened_at: now,
            opened_at_wall: Utc::now(),
        });
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn backed_off_timeout(&self) -> Duration {
        let max = self.config.max_timeout();
        Duration::try_from_secs_f64(self.current_timeout.as_secs_f64() * self.config.backoff_multiplier)
            .unwrap_or(max)
            .max(self.config.base_timeout())
            .min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BreakerConfig {
        BreakerConfig {
            failure_threshold: 2,
            success_threshold: 2,
            base_timeout_ms: 1_000,
            max_timeout_ms: 5_000,
            backoff_multiplier: 1.5,
            half_open_max_trials: None,
        }
    }

    fn permit(state: &mut BreakerState, now: Instant) -> Permit {
        match state.admit(now).0 {
            Admission::Allowed(p) => p,
            Admission::Rejected => panic!("expected admission"),
        }
    }

    fn trip(state: &mut BreakerState, now: Instant) {
        for _ in 0..state.config().failure_threshold {
            let p = permit(state, now);
            state.on_failure(p, now);
        }
    }

    #[test]
    fn starts_closed_with_base_timeout() {
        let state = BreakerState::new(config());
        let now = Instant::now();
        assert_eq!(state.status(now), BreakerStatus::Closed);
        assert_eq!(state.current_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn opens_at_failure_threshold() {
        let mut state = BreakerState::new(config());
        let now = Instant::now();

        let p = permit(&mut state, now);
        assert_eq!(state.on_failure(p, now), None);
        assert_eq!(state.status(now), BreakerStatus::Closed);

        let p = permit(&mut state, now);
        assert_eq!(state.on_failure(p, now), Some(Transition::Opened));
        assert_eq!(state.status(now), BreakerStatus::Open);
        assert_eq!(state.admit(now).0, Admission::Rejected);
    }

    #[test]
    fn success_in_closed_resets_failure_streak() {
        let mut state = BreakerState::new(config());
        let now = Instant::now();

        let p = permit(&mut state, now);
        state.on_failure(p, now);
        let p = permit(&mut state, now);
        state.on_success(p);
        assert_eq!(state.consecutive_failures(), 0);

        let p = permit(&mut state, now);
        state.on_failure(p, now);
        assert_eq!(state.status(now), BreakerStatus::Closed);
    }

    #[test]
    fn half_opens_after_timeout_and_closes_after_successes() {
        let mut state = BreakerState::new(config());
        let t0 = Instant::now();
        trip(&mut state, t0);

        let just_before = t0 + Duration::from_millis(999);
        assert_eq!(state.admit(just_before).0, Admission::Rejected);

        let after = t0 + Duration::from_millis(1_000);
        assert_eq!(state.status(after), BreakerStatus::HalfOpen);
        let (admission, transition) = state.admit(after);
        assert_eq!(transition, Some(Transition::HalfOpened));
        let Admission::Allowed(first) = admission else {
            panic!("trial should be admitted");
        };
        assert!(first.is_trial());

        assert_eq!(state.on_success(first), None);
        let second = permit(&mut state, after);
        assert_eq!(state.on_success(second), Some(Transition::Closed));
        assert_eq!(state.status(after), BreakerStatus::Closed);
        assert_eq!(state.consecutive_failures(), 0);
        assert_eq!(state.consecutive_successes(), 0);
    }

    #[test]
    fn half_open_failure_reopens_with_backoff_capped_at_max() {
        let mut state = BreakerState::new(config());
        let mut now = Instant::now();
        trip(&mut state, now);

        let expected = [1_500u64, 2_250, 3_375, 5_000, 5_000];
        for want in expected {
            now += state.current_timeout();
            let p = permit(&mut state, now);
            assert_eq!(state.on_failure(p, now), Some(Transition::Reopened));
            assert_eq!(state.status(now), BreakerStatus::Open);
            assert_eq!(state.current_timeout(), Duration::from_millis(want));
        }
    }

    #[test]
    fn half_open_limits_trial_slots() {
        let mut cfg = config();
        cfg.half_open_max_trials = Some(1);
        let mut state = BreakerState::new(cfg);
        let t0 = Instant::now();
        trip(&mut state, t0);

        let later = t0 + Duration::from_secs(1);
        let trial = permit(&mut state, later);
        assert_eq!(state.admit(later).0, Admission::Rejected);

        // A released trial frees its slot.
        state.release(trial);
        assert!(matches!(state.admit(later).0, Admission::Allowed(_)));
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut state = BreakerState::new(config());
        let now = Instant::now();

        let slow_call = permit(&mut state, now);
        trip(&mut state, now);
        assert_eq!(state.status(now), BreakerStatus::Open);

        // The slow call started while CLOSED; its success must not count
        // toward closing, and its failure must not extend the backoff.
        assert_eq!(state.on_success(slow_call), None);
        assert_eq!(state.on_failure(slow_call, now), None);
        assert_eq!(state.current_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn reset_is_idempotent_from_any_phase() {
        let mut state = BreakerState::new(config());
        let now = Instant::now();
        trip(&mut state, now);
        state.reset();
        state.reset();
        assert_eq!(state.status(now), BreakerStatus::Closed);
        assert_eq!(state.consecutive_failures(), 0);
        assert_eq!(state.consecutive_successes(), 0);
        assert_eq!(state.current_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn snapshot_reports_opened_at_only_while_open() {
        let mut state = BreakerState::new(config());
        let now = Instant::now();
        assert!(state.snapshot("graph_store", now).opened_at.is_none());

        trip(&mut state, now);
        let snap = state.snapshot("graph_store", now);
        assert_eq!(snap.state, BreakerStatus::Open);
        assert!(snap.opened_at.is_some());
        assert_eq!(snap.consecutive_failures, 2);
        assert_eq!(snap.current_timeout_ms, 1_000);

        let later = state.snapshot("graph_store", now + Duration::from_secs(2));
        assert_eq!(later.state, BreakerStatus::HalfOpen);
        assert!(later.opened_at.is_none());
    }
}
