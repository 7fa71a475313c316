use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnsupportedServiceError;

/// Value recorded for optional attributes the source entry leaves out.
pub const UNKNOWN: &str = "unknown";

/// AWS service codes this tool knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCode {
    #[serde(rename = "AmazonEC2")]
    Ec2,
    #[serde(rename = "AmazonRDS")]
    Rds,
    #[serde(rename = "AmazonElastiCache")]
    ElastiCache,
}

impl ServiceCode {
    pub const ALL: [ServiceCode; 3] = [ServiceCode::Ec2, ServiceCode::Rds, ServiceCode::ElastiCache];

    /// Service code as the Price List API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::Ec2 => "AmazonEC2",
            ServiceCode::Rds => "AmazonRDS",
            ServiceCode::ElastiCache => "AmazonElastiCache",
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            ServiceCode::Ec2 => "ec2",
            ServiceCode::Rds => "rds",
            ServiceCode::ElastiCache => "elasticache",
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCode {
    type Err = UnsupportedServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCode::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.collection().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedServiceError(s.to_string()))
    }
}

/// One priceable SKU, flattened out of a Price List entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub service_code: ServiceCode,
    pub sku: String,
    pub product_family: String,
    pub attributes: Attributes,
    /// USD per hour, verbatim from the source.
    pub on_demand_price_per_usd: String,
}

/// Per-service attribute set. Stored flat under `attributes`, so the
/// variant is recovered from the key set on the way back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attributes {
    Compute(ComputeAttributes),
    Database(DatabaseAttributes),
    Cache(CacheAttributes),
}

impl Attributes {
    pub fn instance_type(&self) -> &str {
        match self {
            Attributes::Compute(a) => &a.instance_type,
            Attributes::Database(a) => &a.instance_type,
            Attributes::Cache(a) => &a.instance_type,
        }
    }

    pub fn region_code(&self) -> &str {
        match self {
            Attributes::Compute(a) => &a.region_code,
            Attributes::Database(a) => &a.region_code,
            Attributes::Cache(a) => &a.region_code,
        }
    }

    pub fn engine(&self) -> &str {
        match self {
            Attributes::Compute(a) => &a.engine,
            Attributes::Database(a) => &a.engine,
            Attributes::Cache(a) => &a.engine,
        }
    }

    pub fn vcpu(&self) -> &str {
        match self {
            Attributes::Compute(a) => &a.vcpu,
            Attributes::Database(a) => &a.vcpu,
            Attributes::Cache(a) => &a.vcpu,
        }
    }

    pub fn memory(&self) -> &str {
        match self {
            Attributes::Compute(a) => &a.memory,
            Attributes::Database(a) => &a.memory,
            Attributes::Cache(a) => &a.memory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeAttributes {
    pub instance_type: String,
    pub vcpu: String,
    pub memory: String,
    pub region_code: String,
    pub location: String,
    pub location_type: String,
    pub usage_type: String,
    pub operation: String,
    pub instance_family: String,
    /// Operating system.
    pub engine: String,
    pub tenancy: String,
    pub capacity_status: String,
    pub pre_installed_sw: String,
    pub license_model: String,
    pub storage: String,
    pub network_performance: String,
    pub physical_processor: String,
    pub processor_architecture: String,
    pub current_generation: String,
    pub normalization_size_factor: String,
    pub ecu: String,
    pub market_option: String,
    pub availability_zone: String,
    pub classic_networking_support: String,
    pub vpc_networking_support: String,
    pub service_name: String,
    pub clock_speed: String,
    pub gpu_memory: String,
    pub dedicated_ebs_throughput: String,
    pub enhanced_networking_supported: String,
    pub intel_avx_available: String,
    pub intel_avx2_available: String,
    pub intel_turbo_available: String,
    pub processor_features: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseAttributes {
    pub instance_type: String,
    pub vcpu: String,
    pub memory: String,
    pub region_code: String,
    pub location: String,
    pub location_type: String,
    pub usage_type: String,
    pub operation: String,
    pub instance_family: String,
    pub instance_type_family: String,
    /// Database engine.
    pub engine: String,
    pub deployment_option: String,
    pub license_model: String,
    pub storage: String,
    pub normalization_size_factor: String,
    pub service_name: String,
    pub engine_code: String,
    pub database_edition: String,
    pub physical_processor: String,
    pub processor_architecture: String,
    pub current_generation: String,
    pub network_performance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheAttributes {
    pub instance_type: String,
    pub vcpu: String,
    pub memory: String,
    pub region_code: String,
    pub location: String,
    pub location_type: String,
    pub usage_type: String,
    pub operation: String,
    pub instance_family: String,
    /// Cache engine.
    pub engine: String,
    pub current_generation: String,
    pub network_performance: String,
    pub service_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_code_parses_api_code_and_collection() {
        assert_eq!("AmazonEC2".parse::<ServiceCode>().unwrap(), ServiceCode::Ec2);
        assert_eq!("rds".parse::<ServiceCode>().unwrap(), ServiceCode::Rds);
        assert_eq!(
            "ElastiCache".parse::<ServiceCode>().unwrap(),
            ServiceCode::ElastiCache
        );
    }

    #[test]
    fn unknown_service_code_is_rejected() {
        let err = "AmazonS3".parse::<ServiceCode>().unwrap_err();
        assert_eq!(err.0, "AmazonS3");
    }

    #[test]
    fn stored_cache_record_comes_back_as_cache_attributes() {
        let record = PriceRecord {
            service_code: ServiceCode::ElastiCache,
            sku: "223SCNAF37X3F5SU".into(),
            product_family: "Cache Instance".into(),
            attributes: Attributes::Cache(CacheAttributes {
                instance_type: "cache.r5.large".into(),
                vcpu: "2".into(),
                memory: "13.07 GiB".into(),
                region_code: "eu-west-3".into(),
                location: "EU (Paris)".into(),
                location_type: "AWS Region".into(),
                usage_type: "EUW3-NodeUsage:cache.r5.large".into(),
                operation: "CreateCacheCluster:0001".into(),
                instance_family: "Memory optimized".into(),
                engine: "Memcached".into(),
                current_generation: "Yes".into(),
                network_performance: "Up to 10 Gigabit".into(),
                service_name: "Amazon ElastiCache".into(),
            }),
            on_demand_price_per_usd: "0.2160000000".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["service_code"], "AmazonElastiCache");
        assert_eq!(json["attributes"]["engine"], "Memcached");

        let back: PriceRecord = serde_json::from_value(json).unwrap();
        assert!(matches!(back.attributes, Attributes::Cache(_)));
        assert_eq!(back, record);
    }
}
