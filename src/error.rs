//! Error types shared across ingestion and lookup.

use std::time::Duration;

use thiserror::Error;

use crate::types::ServiceCode;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
#[error("unsupported service code: {0}")]
pub struct UnsupportedServiceError(pub String);

/// Failures turning one raw Price List entry into a record.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed price list entry: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{service} SKU {sku} is missing required attribute `{field}`")]
    MissingField {
        service: ServiceCode,
        sku: String,
        field: &'static str,
    },

    #[error("cannot resolve on-demand price for SKU {sku}: `{key}` not found")]
    PriceResolution { sku: String, key: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid GetProducts request: {0}")]
    Request(#[source] BoxError),

    #[error("pricing API call failed: {0}")]
    Api(#[source] BoxError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("stored document does not match the price record layout: {0}")]
    Corrupt(String),
}

/// Why one service code's ingestion task failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("store failed: {0}")]
    Store(#[from] StoreError),

    #[error("task aborted: {0}")]
    Aborted(String),
}

#[derive(Debug)]
pub struct ServiceFailure {
    pub service: ServiceCode,
    pub error: ServiceError,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{} of {} service codes failed: {}", failures.len(), failures.len() + succeeded.len(), describe(failures))]
    Failed {
        failures: Vec<ServiceFailure>,
        succeeded: Vec<(ServiceCode, usize)>,
    },

    #[error("ingestion did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

fn describe(failures: &[ServiceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.service, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
#[error("invalid hourly price `{price}`")]
pub struct CostError {
    pub price: String,
    #[source]
    pub source: std::num::ParseFloatError,
}
