//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, own listener)
//! ```
//!
//! # Design Decisions
//! - Structured fields (key, tipo, client) over formatted strings
//! - Metric updates are cheap atomic operations; recording never fails the
//!   request it describes
//! - Request IDs are attached by middleware and propagated downstream

pub mod logging;
pub mod metrics;
