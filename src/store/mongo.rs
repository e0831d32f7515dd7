//! MongoDB-backed route store.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::config::StoreConfig;
use crate::store::{Route, RouteStore, StoreError};

/// Route store backed by a MongoDB collection of `{key, tipo, destinos}`
/// documents.
pub struct MongoRouteStore {
    collection: Collection<Route>,
}

impl MongoRouteStore {
    /// Connect to MongoDB with the configured pool and timeouts.
    ///
    /// The driver connects lazily; an unreachable server surfaces on the
    /// first operation, not here.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection(&config.collection);

        Ok(Self { collection })
    }
}

#[async_trait]
impl RouteStore for MongoRouteStore {
    async fn fetch(&self, key: &str, tipo: &str) -> Result<Option<Route>, StoreError> {
        let route = self
            .collection
            .find_one(doc! { "key": key, "tipo": tipo })
            .await?;
        Ok(route)
    }

    async fn append_destino(
        &self,
        key: &str,
        tipo: &str,
        destino: &str,
    ) -> Result<(), StoreError> {
        // $addToSet keeps the destination list deduplicated; upsert creates
        // the record on first write.
        self.collection
            .update_one(
                doc! { "key": key, "tipo": tipo },
                doc! { "$addToSet": { "destinos": destino } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Route>, StoreError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut routes = Vec::new();
        while let Some(route) = cursor.try_next().await? {
            routes.push(route);
        }
        Ok(routes)
    }
}
