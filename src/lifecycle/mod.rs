//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C / SIGTERM
//!     → Shutdown::trigger()
//!     → broadcast to: HTTP server (stop accepting, drain),
//!                     refresh ticker, visitor sweep
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; every long-lived task holds its own receiver
//! - Background tasks exit between ticks, never mid-operation

pub mod shutdown;

pub use shutdown::Shutdown;
