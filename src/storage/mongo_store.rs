use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::{PriceFilter, PriceStore, StoreConnector};
use crate::error::StoreError;
use crate::types::{PriceRecord, ServiceCode};

pub const DATABASE: &str = "aws_price_list";

/// Connects to MongoDB by connection string.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    uri: String,
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    async fn connect(&self) -> Result<Box<dyn PriceStore>, StoreError> {
        let client = Client::with_uri_str(&self.uri).await?;
        // Client construction is lazy; ping so a bad URI fails here.
        client
            .database(DATABASE)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(Box::new(MongoStore { client }))
    }
}

pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    fn collection(&self, service: ServiceCode) -> Collection<PriceRecord> {
        self.client
            .database(DATABASE)
            .collection(service.collection())
    }
}

fn filter_document(filter: &PriceFilter) -> Document {
    filter
        .conditions
        .iter()
        .map(|(key, value)| (format!("attributes.{key}"), Bson::String(value.clone())))
        .collect()
}

#[async_trait]
impl PriceStore for MongoStore {
    async fn drop_collection(&self, service: ServiceCode) -> Result<(), StoreError> {
        self.collection(service).drop().await?;
        info!(collection = service.collection(), "dropped collection");
        Ok(())
    }

    async fn insert_one(&self, record: &PriceRecord) -> Result<(), StoreError> {
        self.collection(record.service_code)
            .insert_one(record)
            .await?;
        Ok(())
    }

    async fn find(&self, filter: &PriceFilter) -> Result<Vec<PriceRecord>, StoreError> {
        let cursor = self
            .collection(filter.service)
            .find(filter_document(filter))
            .await?;
        cursor.try_collect().await.map_err(|e| {
            if let ErrorKind::BsonDeserialization(inner) = e.kind.as_ref() {
                return StoreError::Corrupt(inner.to_string());
            }
            StoreError::Mongo(e)
        })
    }

    async fn close(&self) {
        // shutdown() consumes the handle; clones share the same pool.
        self.client.clone().shutdown().await;
        debug!("mongo client shut down");
    }
}
