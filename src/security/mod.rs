//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (fixed-window admission per client IP → 429)
//!     → auth.rs (X-API-Key check → 401)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Admission runs before authentication: overload is rejected as early
//!   and as cheaply as possible
//! - Fail closed: any check failure rejects the request
//! - Visitor state is bounded by a periodic background sweep

pub mod auth;
pub mod rate_limit;

pub use rate_limit::RateLimiter;
