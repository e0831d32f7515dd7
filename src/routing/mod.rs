//! Routing subsystem: the in-memory table and round-robin balancer.
//!
//! # Data Flow
//! ```text
//! Resolve(key, tipo):
//!     table snapshot lookup
//!         hit  → destinos[cursor % len], cursor advances under per-key lock
//!         miss → read-through to the store (deadline + circuit guarded)
//!
//! Refresh (startup + periodic):
//!     fetch_all from store → build fresh map → atomic pointer swap
//!     → drop cursors whose destination list changed or vanished
//!
//! AddDestino(key, tipo, destino):
//!     store upsert-append first → on success mirror into the table
//! ```
//!
//! # Design Decisions
//! - Whole-table replacement is a single atomic swap; readers see a
//!   fully-old or fully-new mapping, never a torn one
//! - Cursor advance serializes per key; concurrent resolves on one key each
//!   observe a distinct cursor value
//! - Refresh failure keeps the stale table: availability over freshness
//! - No store I/O happens while any in-memory lock is held

pub mod key;
pub mod table;

use thiserror::Error;

pub use key::RouteKey;
pub use table::RouteTable;

use crate::store::StoreError;

/// Error type for routing operations that reach the durable store.
///
/// "No route found" is not an error; it is the `Ok(None)` resolve outcome.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The store circuit is open; the call was rejected without being tried.
    #[error("route store circuit is open")]
    CircuitOpen,

    /// The store did not answer within the configured deadline.
    #[error("route store deadline exceeded")]
    Deadline,

    /// The store answered with an error.
    #[error(transparent)]
    Store(#[from] StoreError),
}
