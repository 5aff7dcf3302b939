//! Property tests for the breaker state machine.

use std::time::{Duration, Instant};

use lodestone_breaker::{Admission, BreakerState};
use lodestone_core::config::BreakerConfig;
use lodestone_core::models::BreakerStatus;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Succeed,
    Fail,
    Abandon,
    Wait(u64),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Succeed),
        3 => Just(Step::Fail),
        1 => Just(Step::Abandon),
        2 => (0u64..8_000).prop_map(Step::Wait),
    ]
}

fn arb_config() -> impl Strategy<Value = BreakerConfig> {
    (1u32..6, 1u32..4, 100u64..2_000, 1.0f64..3.0, 1u64..10).prop_map(
        |(failure_threshold, success_threshold, base, multiplier, max_factor)| BreakerConfig {
            failure_threshold,
            success_threshold,
            base_timeout_ms: base,
            max_timeout_ms: base * max_factor,
            backoff_multiplier: multiplier,
            half_open_max_trials: None,
        },
    )
}

/// Drive the state machine through `steps`, checking invariants after each.
fn run(config: BreakerConfig, steps: &[Step]) -> Result<(), TestCaseError> {
    let mut state = BreakerState::new(config);
    let mut now = Instant::now();

    for step in steps {
        match *step {
            Step::Wait(ms) => now += Duration::from_millis(ms),
            Step::Succeed | Step::Fail | Step::Abandon => {
                let before = state.status(now);
                let (admission, _) = state.admit(now);
                match admission {
                    Admission::Rejected => {
                        prop_assert_ne!(before, BreakerStatus::Closed);
                    }
                    Admission::Allowed(permit) => {
                        prop_assert_ne!(before, BreakerStatus::Open);
                        match *step {
                            Step::Succeed => {
                                state.on_success(permit);
                            }
                            Step::Fail => {
                                state.on_failure(permit, now);
                            }
                            _ => state.release(permit),
                        }
                    }
                }
            }
        }

        let timeout = state.current_timeout();
        prop_assert!(timeout >= config.base_timeout());
        prop_assert!(timeout <= config.max_timeout());
        if state.status(now) == BreakerStatus::Closed {
            prop_assert!(state.consecutive_failures() < config.failure_threshold);
        }
    }
    Ok(())
}

// ── Timeout stays within [base, max] and CLOSED never exceeds threshold ──

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(
        config in arb_config(),
        steps in prop::collection::vec(arb_step(), 0..80),
    ) {
        run(config, &steps)?;
    }
}

// ── Exactly failure_threshold consecutive failures open a closed breaker ──

proptest! {
    #[test]
    fn opens_exactly_at_threshold(config in arb_config()) {
        let mut state = BreakerState::new(config);
        let now = Instant::now();
        for i in 1..=config.failure_threshold {
            let (admission, _) = state.admit(now);
            let Admission::Allowed(permit) = admission else {
                return Err(TestCaseError::fail("closed breaker rejected a call"));
            };
            state.on_failure(permit, now);
            let expected = if i == config.failure_threshold {
                BreakerStatus::Open
            } else {
                BreakerStatus::Closed
            };
            prop_assert_eq!(state.status(now), expected);
        }
    }
}

// ── Reset from anywhere yields a pristine CLOSED breaker ──

proptest! {
    #[test]
    fn reset_restores_initial_state(
        config in arb_config(),
        steps in prop::collection::vec(arb_step(), 0..40),
    ) {
        let mut state = BreakerState::new(config);
        let now = Instant::now();
        for step in steps {
            if let (Admission::Allowed(permit), _) = state.admit(now) {
                match step {
                    Step::Succeed => { state.on_success(permit); }
                    _ => { state.on_failure(permit, now); }
                }
            }
        }
        state.reset();
        prop_assert_eq!(state.status(now), BreakerStatus::Closed);
        prop_assert_eq!(state.consecutive_failures(), 0);
        prop_assert_eq!(state.consecutive_successes(), 0);
        prop_assert_eq!(state.current_timeout(), config.base_timeout());
    }
}
