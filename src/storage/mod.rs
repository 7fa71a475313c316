#[cfg(test)]
pub(crate) mod memory_store;
pub mod mongo_store;

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::types::{PriceRecord, ServiceCode};

pub use mongo_store::MongoConnector;

/// Equality filter on attribute keys of one service's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFilter {
    pub service: ServiceCode,
    /// Attribute name (as stored under `attributes`) to required value.
    pub conditions: BTreeMap<&'static str, String>,
}

impl PriceFilter {
    pub fn new(service: ServiceCode) -> Self {
        Self {
            service,
            conditions: BTreeMap::new(),
        }
    }

    pub fn where_eq(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.conditions.insert(key, value.into());
        self
    }

    pub fn where_eq_opt(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.where_eq(key, v),
            None => self,
        }
    }
}

/// One open connection to the document store.
///
/// Records are grouped per service code, one collection each.
#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn drop_collection(&self, service: ServiceCode) -> Result<(), StoreError>;

    async fn insert_one(&self, record: &PriceRecord) -> Result<(), StoreError>;

    async fn find(&self, filter: &PriceFilter) -> Result<Vec<PriceRecord>, StoreError>;

    /// Release the connection. Further calls are not expected.
    async fn close(&self);

    /// Replace everything stored for `service` with `records`. Prior
    /// contents are dropped first; inserts then go one at a time.
    async fn replace_collection(
        &self,
        service: ServiceCode,
        records: &[PriceRecord],
    ) -> Result<(), StoreError> {
        self.drop_collection(service).await?;
        info!(service = %service, count = records.len(), "inserting records");
        for record in records {
            debug!(service = %service, sku = %record.sku, "inserting record");
            self.insert_one(record).await?;
        }
        Ok(())
    }
}

/// Opens store connections. Each ingestion task gets its own.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PriceStore>, StoreError>;
}
