//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a fragile dependency:
//!     → breaker.allow()  (false while the circuit is open → fail fast)
//!     → perform the call
//!     → breaker.success() / breaker.failure()  (report the outcome)
//! ```
//!
//! # Design Decisions
//! - The breaker knows nothing about the call it protects; callers check
//!   `allow` first and report the outcome afterwards
//! - One shared instance per guarded dependency, passed in explicitly —
//!   no process-wide singleton
//! - Trip and timed re-close are the only transitions; no manual override

pub mod circuit_breaker;

pub use circuit_breaker::CircuitBreaker;
