//! Lazy MongoDB store for freight loads and carrier-call records.
//!
//! The connection is a single owned resource established on first use and
//! discarded on any failure, so the next call reconnects from scratch.
//! There is no retry beyond that; every operation is single-step.

use crate::config::DatabaseConfig;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, FindOptions},
    Client, Collection,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

const QUERY_MAX_TIME: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required setting is absent. Raised at first use, not construction.
    #[error("{0} not found in environment variables")]
    Config(&'static str),

    /// The database could not be reached or the operation failed. The
    /// cached connection has been dropped; the next call reconnects.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] mongodb::error::Error),
}

#[derive(Clone)]
pub struct LoadStore {
    config: DatabaseConfig,
    handle: Arc<Mutex<Option<Handle>>>,
}

#[derive(Clone)]
struct Handle {
    loads: Collection<Document>,
    carrier_calls: Collection<Document>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertReceipt {
    pub inserted_id: String,
    pub acknowledged: bool,
}

impl LoadStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Query the loads collection by exact equipment-type match. Returned
    /// documents carry their `_id` as a plain string.
    pub async fn find_loads_by_equipment(
        &self,
        equipment_type: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let handle = self.handle().await?;

        let options = FindOptions::builder().max_time(QUERY_MAX_TIME).build();
        let filter = doc! { "equipment_type": equipment_type };

        let found: Result<Vec<Document>, mongodb::error::Error> =
            match handle.loads.find(filter, options).await {
                Ok(cursor) => cursor.try_collect().await,
                Err(err) => Err(err),
            };

        match found {
            Ok(mut loads) => {
                for load in &mut loads {
                    stringify_id(load);
                }
                Ok(loads)
            }
            Err(err) => {
                tracing::error!(error = %err, "load query failed, resetting connection");
                self.reset().await;
                Err(StoreError::Unavailable(err))
            }
        }
    }

    /// Insert one carrier-call record. The caller stamps `created_at`
    /// before calling; the store never touches the document's contents.
    pub async fn insert_carrier_call(
        &self,
        document: Document,
    ) -> Result<InsertReceipt, StoreError> {
        let handle = self.handle().await?;

        match handle.carrier_calls.insert_one(document, None).await {
            Ok(result) => Ok(InsertReceipt {
                inserted_id: stringify_bson_id(&result.inserted_id),
                // The driver surfaces unacknowledged writes as errors, so a
                // returned result is always an acknowledged one.
                acknowledged: true,
            }),
            Err(err) => {
                tracing::error!(error = %err, "carrier call insert failed, resetting connection");
                self.reset().await;
                Err(StoreError::Unavailable(err))
            }
        }
    }

    async fn handle(&self) -> Result<Handle, StoreError> {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.as_ref() {
            return Ok(handle.clone());
        }
        let handle = self.connect().await?;
        *guard = Some(handle.clone());
        Ok(handle)
    }

    async fn reset(&self) {
        *self.handle.lock().await = None;
    }

    async fn connect(&self) -> Result<Handle, StoreError> {
        let url = self
            .config
            .url
            .as_ref()
            .ok_or(StoreError::Config("MONGODB_URL"))?;
        let db_name = self
            .config
            .db_name
            .as_deref()
            .ok_or(StoreError::Config("DATABASE_NAME"))?;
        let loads_name = self
            .config
            .loads_collection
            .as_deref()
            .ok_or(StoreError::Config("LOADS_COLLECTION_NAME"))?;

        let mut options = ClientOptions::parse(url.expose_secret())
            .await
            .map_err(StoreError::Unavailable)?;
        options.app_name = Some("carrier-service".to_string());
        // URI-level settings win; these are the defaults the service runs with
        options
            .server_selection_timeout
            .get_or_insert(Duration::from_secs(10));
        options.connect_timeout.get_or_insert(Duration::from_secs(15));
        options.max_idle_time = Some(Duration::from_secs(30));
        options.max_pool_size = Some(10);
        options.min_pool_size = Some(1);
        options.retry_writes = Some(true);
        options.retry_reads = Some(true);

        let client = Client::with_options(options).map_err(StoreError::Unavailable)?;
        let db = client.database(db_name);

        // Fail here, not on the first query, if the server is unreachable.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "MongoDB connection failed");
                StoreError::Unavailable(err)
            })?;

        tracing::info!(database = %db_name, "connected to MongoDB");

        Ok(Handle {
            loads: db.collection(loads_name),
            carrier_calls: db.collection(&self.config.carriers_calls_collection),
        })
    }
}

/// Rewrite a database-native `_id` as its plain string form so documents
/// serialize cleanly to JSON.
fn stringify_id(document: &mut Document) {
    if let Some(id) = document.get("_id").cloned() {
        document.insert("_id", stringify_bson_id(&id));
    }
}

fn stringify_bson_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn object_id_is_rewritten_as_hex_string() {
        let oid = ObjectId::new();
        let mut document = doc! { "_id": oid, "equipment_type": "flatbed" };

        stringify_id(&mut document);

        assert_eq!(document.get_str("_id").unwrap(), oid.to_hex());
        assert_eq!(document.get_str("equipment_type").unwrap(), "flatbed");
    }

    #[test]
    fn string_id_is_left_as_is() {
        let mut document = doc! { "_id": "load-42" };
        stringify_id(&mut document);
        assert_eq!(document.get_str("_id").unwrap(), "load-42");
    }

    #[tokio::test]
    async fn missing_config_is_fatal_at_first_use() {
        let store = LoadStore::new(DatabaseConfig::default());

        let err = store.find_loads_by_equipment("flatbed").await.unwrap_err();
        assert!(matches!(err, StoreError::Config("MONGODB_URL")));
    }
}
