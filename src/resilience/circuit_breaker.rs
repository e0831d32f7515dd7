//! Circuit breaker for downstream protection.
//!
//! # States
//! - Closed: calls allowed, consecutive failures accumulate
//! - Open: calls rejected until a timer expires
//!
//! There is no explicit half-open probe state: once the open period elapses,
//! the next call is treated as a normal closed-state call and its outcome
//! decides whether the circuit trips again.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A trip/reset guard around one fragile dependency.
///
/// All three operations serialize on a single lock; each is O(1) and never
/// blocks on anything but the lock itself.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    max_failures: u32,
    open_duration: Duration,
}

#[derive(Debug)]
struct BreakerState {
    failures: u32,
    open_until: Option<Instant>,
}

impl CircuitBreaker {
    /// Create a closed breaker that trips after `max_failures` consecutive
    /// failures and stays open for `open_duration`.
    pub fn new(max_failures: u32, open_duration: Duration) -> Self {
        Self {
            state: Mutex::new(BreakerState {
                failures: 0,
                open_until: None,
            }),
            max_failures,
            open_duration,
        }
    }

    /// True unless the circuit is currently open.
    pub fn allow(&self) -> bool {
        let state = self.state.lock().expect("circuit breaker mutex poisoned");
        match state.open_until {
            Some(until) => Instant::now() >= until,
            None => true,
        }
    }

    /// Report a successful call: the failure count starts over.
    pub fn success(&self) {
        let mut state = self.state.lock().expect("circuit breaker mutex poisoned");
        state.failures = 0;
    }

    /// Report a failed call; trips the circuit at the configured threshold.
    pub fn failure(&self) {
        let mut state = self.state.lock().expect("circuit breaker mutex poisoned");
        state.failures += 1;
        if state.failures >= self.max_failures {
            state.open_until = Some(Instant::now() + self.open_duration);
            state.failures = 0;
            tracing::warn!(
                open_for = ?self.open_duration,
                "Circuit opened after consecutive failures"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trips_after_max_failures() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        assert!(breaker.allow());

        breaker.failure();
        breaker.failure();
        assert!(breaker.allow(), "still closed below the threshold");

        breaker.failure();
        assert!(!breaker.allow(), "open after the third failure");
    }

    #[test]
    fn recloses_after_open_duration() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(20));
        breaker.failure();
        assert!(!breaker.allow());

        std::thread::sleep(Duration::from_millis(30));
        assert!(breaker.allow(), "open period elapsed");
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(2, Duration::from_secs(60));
        breaker.failure();
        breaker.success();
        breaker.failure();
        assert!(breaker.allow(), "success in between keeps the circuit closed");

        breaker.failure();
        assert!(!breaker.allow());
    }

    #[test]
    fn success_does_not_close_an_open_circuit() {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(60));
        breaker.failure();
        breaker.success();
        assert!(!breaker.allow(), "success clears the count, not the timer");
    }
}
