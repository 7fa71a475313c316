use tracing::info;

use crate::cost::hourly_to_monthly;
use crate::error::{CostError, StoreError};
use crate::storage::{PriceFilter, PriceStore};
use crate::types::{PriceRecord, ServiceCode};

/// Narrowing shared by every service: instance type, vCPU count, memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceFilter {
    pub instance_type: Option<String>,
    pub vcpu: Option<String>,
    /// GiB, as a bare number ("8", "13.07").
    pub memory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceQuery {
    Compute {
        instance: InstanceFilter,
        os: String,
        tenancy: String,
        capacity_status: String,
        pre_installed_sw: String,
    },
    Database {
        instance: InstanceFilter,
        engine: String,
        deployment_option: String,
    },
    Cache {
        instance: InstanceFilter,
        engine: String,
    },
}

impl PriceQuery {
    pub fn service(&self) -> ServiceCode {
        match self {
            PriceQuery::Compute { .. } => ServiceCode::Ec2,
            PriceQuery::Database { .. } => ServiceCode::Rds,
            PriceQuery::Cache { .. } => ServiceCode::ElastiCache,
        }
    }

    pub fn filter(&self) -> PriceFilter {
        let base = PriceFilter::new(self.service());
        let (base, instance) = match self {
            PriceQuery::Compute {
                instance,
                os,
                tenancy,
                capacity_status,
                pre_installed_sw,
            } => (
                base.where_eq("engine", os)
                    .where_eq("tenancy", tenancy)
                    .where_eq("capacity_status", capacity_status)
                    .where_eq("pre_installed_sw", pre_installed_sw),
                instance,
            ),
            PriceQuery::Database {
                instance,
                engine,
                deployment_option,
            } => (
                base.where_eq("engine", engine)
                    .where_eq("deployment_option", deployment_option),
                instance,
            ),
            PriceQuery::Cache { instance, engine } => (base.where_eq("engine", engine), instance),
        };

        base.where_eq_opt("instance_type", instance.instance_type.as_deref())
            .where_eq_opt("vcpu", instance.vcpu.as_deref())
            .where_eq_opt("memory", instance.memory.as_deref().map(|m| format!("{m} GiB")))
    }
}

/// A matched record with its monthly price worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRecord {
    pub record: PriceRecord,
    pub monthly_usd: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("SKU {sku}: {source}")]
    Price {
        sku: String,
        #[source]
        source: CostError,
    },
}

/// Run `query` against the store. An empty result is a valid answer.
pub async fn lookup(
    store: &dyn PriceStore,
    query: &PriceQuery,
) -> Result<Vec<PricedRecord>, LookupError> {
    let filter = query.filter();
    let records = store.find(&filter).await?;
    info!(service = %filter.service, matches = records.len(), "lookup finished");

    records
        .into_iter()
        .map(|record| {
            let monthly_usd =
                hourly_to_monthly(&record.on_demand_price_per_usd).map_err(|source| {
                    LookupError::Price {
                        sku: record.sku.clone(),
                        source,
                    }
                })?;
            Ok(PricedRecord {
                record,
                monthly_usd,
            })
        })
        .collect()
}
