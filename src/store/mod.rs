//! Durable route store boundary.
//!
//! # Data Flow
//! ```text
//! routing table refresh ──▶ fetch_all() ──▶ full record set
//! cache-miss fallback  ──▶ fetch()     ──▶ one record or None
//! add-destino write    ──▶ append_destino() (upsert + set semantics)
//! ```
//!
//! # Design Decisions
//! - The store is the sole owner of persisted routes; the in-memory table is
//!   a best-effort projection, never the source of truth
//! - Destination lists are ordered and deduplicated by the store itself
//! - Implementations: MongoDB for production, an in-memory map for tests and
//!   local development

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;
pub mod mongo;

pub use memory::InMemoryRouteStore;
pub use mongo::MongoRouteStore;

/// A persisted route record: the `(key, tipo)` pair and its ordered,
/// deduplicated destination list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub key: String,
    pub tipo: String,
    #[serde(default)]
    pub destinos: Vec<String>,
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The durable store contract consumed by the routing table.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Fetch the record for `(key, tipo)`, or `None` when absent.
    async fn fetch(&self, key: &str, tipo: &str) -> Result<Option<Route>, StoreError>;

    /// Append a destination to `(key, tipo)`, creating the record when
    /// absent. Already-present destinations are left untouched.
    async fn append_destino(&self, key: &str, tipo: &str, destino: &str)
        -> Result<(), StoreError>;

    /// Enumerate every record, for a full routing table refresh.
    async fn fetch_all(&self) -> Result<Vec<Route>, StoreError>;
}
