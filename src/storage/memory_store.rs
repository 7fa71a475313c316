use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{PriceFilter, PriceStore, StoreConnector};
use crate::error::StoreError;
use crate::types::{PriceRecord, ServiceCode};

/// In-process store with MongoDB's equality-filter semantics. Clones share
/// the same collections, so a connector hands out views of one store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<ServiceCode, Vec<PriceRecord>>>>,
    reject_inserts: Arc<HashSet<ServiceCode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts into these collections fail, as if the server refused them.
    pub fn rejecting(services: &[ServiceCode]) -> Self {
        Self {
            reject_inserts: Arc::new(services.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn seed(&self, records: Vec<PriceRecord>) {
        let mut collections = self.collections.lock().unwrap();
        for record in records {
            collections
                .entry(record.service_code)
                .or_default()
                .push(record);
        }
    }

    pub fn records(&self, service: ServiceCode) -> Vec<PriceRecord> {
        self.collections
            .lock()
            .unwrap()
            .get(&service)
            .cloned()
            .unwrap_or_default()
    }
}

fn matches(record: &PriceRecord, filter: &PriceFilter) -> bool {
    let Ok(doc) = serde_json::to_value(record) else {
        return false;
    };
    filter
        .conditions
        .iter()
        .all(|(key, want)| doc["attributes"][*key].as_str() == Some(want.as_str()))
}

#[async_trait]
impl PriceStore for MemoryStore {
    async fn drop_collection(&self, service: ServiceCode) -> Result<(), StoreError> {
        self.collections.lock().unwrap().remove(&service);
        Ok(())
    }

    async fn insert_one(&self, record: &PriceRecord) -> Result<(), StoreError> {
        if self.reject_inserts.contains(&record.service_code) {
            return Err(StoreError::Unavailable(format!(
                "insert into {} refused",
                record.service_code.collection()
            )));
        }
        self.seed(vec![record.clone()]);
        Ok(())
    }

    async fn find(&self, filter: &PriceFilter) -> Result<Vec<PriceRecord>, StoreError> {
        Ok(self
            .records(filter.service)
            .into_iter()
            .filter(|r| matches(r, filter))
            .collect())
    }

    async fn close(&self) {}
}

#[async_trait]
impl StoreConnector for MemoryStore {
    async fn connect(&self) -> Result<Box<dyn PriceStore>, StoreError> {
        Ok(Box::new(self.clone()))
    }
}
