//! In-memory routing table with per-key round-robin selection.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::resilience::CircuitBreaker;
use crate::routing::{RouteError, RouteKey};
use crate::store::{RouteStore, StoreError};

type Destinations = Arc<Vec<String>>;

/// The routing cache and balancer.
///
/// Holds a read-mostly projection of the durable store plus one round-robin
/// cursor per key. The table itself is replaced wholesale by `refresh`; the
/// cursors advance under a per-key lock on every `resolve`.
pub struct RouteTable {
    store: Arc<dyn RouteStore>,
    breaker: Arc<CircuitBreaker>,
    table: ArcSwap<HashMap<RouteKey, Destinations>>,
    cursors: DashMap<RouteKey, usize>,
    store_deadline: Duration,
}

impl RouteTable {
    /// Create an empty table over the given store.
    ///
    /// The breaker instance guards every store access made through this
    /// table; share it with other callers of the same store if any exist.
    pub fn new(
        store: Arc<dyn RouteStore>,
        breaker: Arc<CircuitBreaker>,
        store_deadline: Duration,
    ) -> Self {
        Self {
            store,
            breaker,
            table: ArcSwap::from_pointee(HashMap::new()),
            cursors: DashMap::new(),
            store_deadline,
        }
    }

    /// Number of keys currently cached.
    pub fn cached_routes(&self) -> usize {
        self.table.load().len()
    }

    /// Resolve `(key, tipo)` to the next destination in rotation.
    ///
    /// `Ok(None)` means no route or no destinations exist — distinct from a
    /// store failure, which surfaces as an error.
    pub async fn resolve(&self, key: &RouteKey) -> Result<Option<String>, RouteError> {
        let cached = {
            let table = self.table.load();
            table.get(key).filter(|list| !list.is_empty()).cloned()
        };

        let destinos = match cached {
            Some(list) => list,
            None => {
                tracing::debug!(key = %key.key, tipo = %key.tipo, "Cache miss, querying store");
                match self
                    .guarded(self.store.fetch(&key.key, &key.tipo))
                    .await?
                {
                    Some(route) if !route.destinos.is_empty() => Arc::new(route.destinos),
                    _ => return Ok(None),
                }
            }
        };

        // The entry guard serializes the advance: two concurrent resolves on
        // one key cannot observe the same cursor value.
        let index = {
            let mut cursor = self.cursors.entry(key.clone()).or_insert(0);
            let index = *cursor % destinos.len();
            *cursor = (index + 1) % destinos.len();
            index
        };

        Ok(Some(destinos[index].clone()))
    }

    /// Append a destination: durable store first, cache second.
    ///
    /// The cache mirrors the store's set semantics and keeps the existing
    /// cursor, so the new destination joins the rotation immediately. A
    /// store failure leaves the cache untouched.
    pub async fn add_destino(&self, key: &RouteKey, destino: &str) -> Result<(), RouteError> {
        self.guarded(self.store.append_destino(&key.key, &key.tipo, destino))
            .await?;

        self.table.rcu(|table| {
            let mut next = HashMap::clone(table);
            let destinos = next.entry(key.clone()).or_insert_with(|| Arc::new(Vec::new()));
            if !destinos.iter().any(|d| d == destino) {
                let mut list = Vec::clone(destinos);
                list.push(destino.to_string());
                *destinos = Arc::new(list);
            }
            next
        });

        Ok(())
    }

    /// Replace the whole table from the store.
    ///
    /// Best-effort: any failure (error, deadline, open circuit) is logged
    /// and the previous table stays in place. Cursors survive only for keys
    /// whose destination list is unchanged; everything else restarts at 0.
    pub async fn refresh(&self) {
        let routes = match self.guarded(self.store.fetch_all()).await {
            Ok(routes) => routes,
            Err(error) => {
                tracing::warn!(%error, "Route refresh failed, keeping previous table");
                metrics::record_refresh(false, self.cached_routes());
                return;
            }
        };

        let mut next: HashMap<RouteKey, Destinations> = HashMap::with_capacity(routes.len());
        for route in routes {
            next.insert(
                RouteKey::new(route.key, route.tipo),
                Arc::new(route.destinos),
            );
        }

        let next = Arc::new(next);
        let previous = self.table.swap(Arc::clone(&next));

        self.cursors
            .retain(|key, _| match (previous.get(key), next.get(key)) {
                (Some(old), Some(new)) => old == new,
                _ => false,
            });

        tracing::info!(routes = next.len(), "Routing table refreshed");
        metrics::record_refresh(true, next.len());
    }

    /// Periodic refresh task; runs until the shutdown signal.
    pub async fn run_refresh(
        self: Arc<Self>,
        every: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately; startup already refreshed.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => self.refresh().await,
                _ = shutdown.recv() => {
                    tracing::debug!("Route refresh task stopping");
                    break;
                }
            }
        }
    }

    /// Run one store operation under the breaker and the deadline.
    async fn guarded<T, F>(&self, operation: F) -> Result<T, RouteError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        if !self.breaker.allow() {
            metrics::record_circuit_rejection();
            return Err(RouteError::CircuitOpen);
        }

        match tokio::time::timeout(self.store_deadline, operation).await {
            Ok(Ok(value)) => {
                self.breaker.success();
                Ok(value)
            }
            Ok(Err(error)) => {
                self.breaker.failure();
                Err(RouteError::Store(error))
            }
            Err(_) => {
                self.breaker.failure();
                Err(RouteError::Deadline)
            }
        }
    }
}
