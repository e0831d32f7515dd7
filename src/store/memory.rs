//! In-memory route store for tests and local development.
//!
//! Mirrors the MongoDB semantics: upsert on append, set semantics for the
//! destination list, full enumeration for refresh.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{Route, RouteStore, StoreError};

/// Route store held in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryRouteStore {
    records: Mutex<HashMap<(String, String), Vec<String>>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RouteStore for InMemoryRouteStore {
    async fn fetch(&self, key: &str, tipo: &str) -> Result<Option<Route>, StoreError> {
        let records = self.records.lock().expect("route store mutex poisoned");
        Ok(records
            .get(&(key.to_string(), tipo.to_string()))
            .map(|destinos| Route {
                key: key.to_string(),
                tipo: tipo.to_string(),
                destinos: destinos.clone(),
            }))
    }

    async fn append_destino(
        &self,
        key: &str,
        tipo: &str,
        destino: &str,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("route store mutex poisoned");
        let destinos = records
            .entry((key.to_string(), tipo.to_string()))
            .or_default();
        if !destinos.iter().any(|d| d == destino) {
            destinos.push(destino.to_string());
        }
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Route>, StoreError> {
        let records = self.records.lock().expect("route store mutex poisoned");
        Ok(records
            .iter()
            .map(|((key, tipo), destinos)| Route {
                key: key.clone(),
                tipo: tipo.clone(),
                destinos: destinos.clone(),
            })
            .collect())
    }
}
