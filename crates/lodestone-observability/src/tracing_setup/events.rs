//! Structured log events for breaker transitions and query-path degradation.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A breaker tripped. `from_trial` is set when a HALF_OPEN trial failed.
pub fn breaker_opened(breaker: &str, consecutive_failures: u32, timeout_ms: u64, from_trial: bool) {
    tracing::warn!(
        event = "breaker_opened",
        breaker = %breaker,
        consecutive_failures = consecutive_failures,
        timeout_ms = timeout_ms,
        from_trial = from_trial,
        "circuit breaker opened"
    );
}

pub fn breaker_half_opened(breaker: &str) {
    tracing::info!(
        event = "breaker_half_opened",
        breaker = %breaker,
        "circuit breaker half-open, admitting trial calls"
    );
}

pub fn breaker_closed(breaker: &str) {
    tracing::info!(
        event = "breaker_closed",
        breaker = %breaker,
        "circuit breaker closed"
    );
}

/// A call was refused without reaching the dependency.
pub fn breaker_rejected(breaker: &str) {
    tracing::debug!(
        event = "breaker_rejected",
        breaker = %breaker,
        "call rejected by circuit breaker"
    );
}

pub fn breaker_reset(breaker: &str) {
    tracing::info!(
        event = "breaker_reset",
        breaker = %breaker,
        "circuit breaker reset"
    );
}

/// A retrieval path produced no usable result for this query.
pub fn path_degraded(path: &str, reason: &str, latency_ms: u64) {
    tracing::warn!(
        event = "path_degraded",
        path = %path,
        reason = %reason,
        latency_ms = latency_ms,
        "retrieval path degraded"
    );
}

pub fn fusion_completed(strategy: &str, final_confidence: f64, quality_score: f64, fusion_ready: bool) {
    tracing::info!(
        event = "fusion_completed",
        strategy = %strategy,
        final_confidence = final_confidence,
        quality_score = quality_score,
        fusion_ready = fusion_ready,
        "fusion completed"
    );
}

/// The requested strategy was not recognized; the default was used instead.
pub fn strategy_fallback(requested: &str, fallback: &str) {
    tracing::warn!(
        event = "strategy_fallback",
        requested = %requested,
        fallback = %fallback,
        "unknown fusion strategy, using default"
    );
}

/// Answer generation failed and a local response was served instead.
pub fn generation_fallback(generator: &str, error: &str) {
    tracing::warn!(
        event = "generation_fallback",
        generator = %generator,
        error = %error,
        "generator unavailable, serving local digest"
    );
}
