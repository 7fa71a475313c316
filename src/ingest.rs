//! Concurrent fetch → normalize → store pipeline, one task per service code.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::{IngestError, ServiceError, ServiceFailure};
use crate::pricing::{normalize_page, PriceListSource, ProductFilters};
use crate::storage::StoreConnector;
use crate::types::{PriceRecord, ServiceCode};

pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;
/// Paging through the full EC2 catalog and inserting record by record is slow.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub filters: ProductFilters,
    pub max_in_flight: usize,
    /// Bound on the whole fan-out, not on each task.
    pub deadline: Duration,
}

impl IngestOptions {
    pub fn new(filters: ProductFilters) -> Self {
        Self {
            filters,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

#[derive(Debug, Default)]
pub struct IngestSummary {
    /// Records stored per service code, in completion order.
    pub ingested: Vec<(ServiceCode, usize)>,
}

/// Fetch, normalize and store every service code in `services`.
///
/// All tasks run to completion even when some fail; every failure is
/// returned. Successful collections are kept regardless.
pub async fn ingest_all(
    source: Arc<dyn PriceListSource>,
    connector: Arc<dyn StoreConnector>,
    services: &[ServiceCode],
    options: &IngestOptions,
) -> Result<IngestSummary, IngestError> {
    let permits = Arc::new(Semaphore::new(options.max_in_flight.max(1)));
    let mut tasks = JoinSet::new();
    let mut task_services = HashMap::new();

    for &service in services {
        let permits = permits.clone();
        let source = source.clone();
        let connector = connector.clone();
        let filters = options.filters.clone();
        let handle = tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ServiceError::Aborted(e.to_string()))?;
            ingest_service(service, source.as_ref(), connector.as_ref(), &filters).await
        });
        task_services.insert(handle.id(), service);
    }

    let join_all = async {
        let mut summary = IngestSummary::default();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Ok(count))) => summary.ingested.push((task_services[&id], count)),
                Ok((id, Err(error))) => failures.push(ServiceFailure {
                    service: task_services[&id],
                    error,
                }),
                Err(join_error) => failures.push(ServiceFailure {
                    service: task_services[&join_error.id()],
                    error: ServiceError::Aborted(join_error.to_string()),
                }),
            }
        }
        (summary, failures)
    };

    // On expiry the JoinSet is dropped with this function, aborting what is left.
    let (summary, failures) = tokio::time::timeout(options.deadline, join_all)
        .await
        .map_err(|_| IngestError::DeadlineExceeded(options.deadline))?;

    for failure in &failures {
        error!(service = %failure.service, error = %failure.error, "ingestion failed");
    }
    if failures.is_empty() {
        Ok(summary)
    } else {
        Err(IngestError::Failed {
            failures,
            succeeded: summary.ingested,
        })
    }
}

async fn ingest_service(
    service: ServiceCode,
    source: &dyn PriceListSource,
    connector: &dyn StoreConnector,
    filters: &ProductFilters,
) -> Result<usize, ServiceError> {
    info!(service = %service, region = %filters.region_code, "fetching price list");

    let mut records: Vec<PriceRecord> = Vec::new();
    let mut pages = 0usize;
    let mut cursor = source.pages(service, filters);
    while let Some(entries) = cursor.next_page().await? {
        pages += 1;
        normalize_page(service, &entries, &mut records)?;
    }
    drop(cursor);
    info!(service = %service, pages, records = records.len(), "fetched price list");

    let store = connector.connect().await?;
    let replaced = store.replace_collection(service, &records).await;
    store.close().await;
    replaced?;

    info!(service = %service, records = records.len(), "stored price list");
    Ok(records.len())
}
