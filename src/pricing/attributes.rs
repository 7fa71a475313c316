use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::types::{
    Attributes, CacheAttributes, ComputeAttributes, DatabaseAttributes, ServiceCode, UNKNOWN,
};

/// Reads fields out of one entry's `product.attributes` map.
struct Fields<'a> {
    service: ServiceCode,
    sku: &'a str,
    attrs: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn required(&self, key: &'static str) -> Result<String, NormalizeError> {
        self.attrs
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| NormalizeError::MissingField {
                service: self.service,
                sku: self.sku.to_string(),
                field: key,
            })
    }

    /// Fields AWS only sets for some SKUs of a service.
    fn optional(&self, key: &str) -> String {
        self.attrs
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN)
            .to_string()
    }
}

/// Map the generic attribute tree into the typed attribute set for `service`.
pub fn map_attributes(
    service: ServiceCode,
    sku: &str,
    attrs: &Map<String, Value>,
) -> Result<Attributes, NormalizeError> {
    let f = Fields { service, sku, attrs };
    let mapped = match service {
        ServiceCode::Ec2 => Attributes::Compute(compute(&f)?),
        ServiceCode::Rds => Attributes::Database(database(&f)?),
        ServiceCode::ElastiCache => Attributes::Cache(cache(&f)?),
    };
    Ok(mapped)
}

fn compute(f: &Fields) -> Result<ComputeAttributes, NormalizeError> {
    Ok(ComputeAttributes {
        instance_type: f.required("instanceType")?,
        vcpu: f.required("vcpu")?,
        memory: f.required("memory")?,
        region_code: f.required("regionCode")?,
        location: f.required("location")?,
        location_type: f.required("locationType")?,
        usage_type: f.required("usagetype")?,
        operation: f.required("operation")?,
        instance_family: f.required("instanceFamily")?,
        engine: f.required("operatingSystem")?,
        tenancy: f.required("tenancy")?,
        capacity_status: f.required("capacitystatus")?,
        pre_installed_sw: f.required("preInstalledSw")?,
        license_model: f.required("licenseModel")?,
        storage: f.required("storage")?,
        network_performance: f.required("networkPerformance")?,
        physical_processor: f.required("physicalProcessor")?,
        processor_architecture: f.required("processorArchitecture")?,
        current_generation: f.required("currentGeneration")?,
        normalization_size_factor: f.required("normalizationSizeFactor")?,
        ecu: f.required("ecu")?,
        market_option: f.required("marketoption")?,
        availability_zone: f.required("availabilityzone")?,
        classic_networking_support: f.required("classicnetworkingsupport")?,
        vpc_networking_support: f.required("vpcnetworkingsupport")?,
        service_name: f.required("servicename")?,
        clock_speed: f.optional("clockSpeed"),
        gpu_memory: f.optional("gpuMemory"),
        dedicated_ebs_throughput: f.optional("dedicatedEbsThroughput"),
        enhanced_networking_supported: f.optional("enhancedNetworkingSupported"),
        intel_avx_available: f.optional("intelAvxAvailable"),
        intel_avx2_available: f.optional("intelAvx2Available"),
        intel_turbo_available: f.optional("intelTurboAvailable"),
        processor_features: f.optional("processorFeatures"),
    })
}

// Edition and processor descriptors differ between database engines.
fn database(f: &Fields) -> Result<DatabaseAttributes, NormalizeError> {
    Ok(DatabaseAttributes {
        instance_type: f.required("instanceType")?,
        vcpu: f.required("vcpu")?,
        memory: f.required("memory")?,
        region_code: f.required("regionCode")?,
        location: f.required("location")?,
        location_type: f.required("locationType")?,
        usage_type: f.required("usagetype")?,
        operation: f.required("operation")?,
        instance_family: f.required("instanceFamily")?,
        instance_type_family: f.required("instanceTypeFamily")?,
        engine: f.required("databaseEngine")?,
        deployment_option: f.required("deploymentOption")?,
        license_model: f.required("licenseModel")?,
        storage: f.required("storage")?,
        normalization_size_factor: f.required("normalizationSizeFactor")?,
        service_name: f.required("servicename")?,
        engine_code: f.optional("engineCode"),
        database_edition: f.optional("databaseEdition"),
        physical_processor: f.optional("physicalProcessor"),
        processor_architecture: f.optional("processorArchitecture"),
        current_generation: f.optional("currentGeneration"),
        network_performance: f.optional("networkPerformance"),
    })
}

fn cache(f: &Fields) -> Result<CacheAttributes, NormalizeError> {
    Ok(CacheAttributes {
        instance_type: f.required("instanceType")?,
        vcpu: f.required("vcpu")?,
        memory: f.required("memory")?,
        region_code: f.required("regionCode")?,
        location: f.required("location")?,
        location_type: f.required("locationType")?,
        usage_type: f.required("usagetype")?,
        operation: f.required("operation")?,
        instance_family: f.required("instanceFamily")?,
        engine: f.required("cacheEngine")?,
        current_generation: f.required("currentGeneration")?,
        network_performance: f.required("networkPerformance")?,
        service_name: f.required("servicename")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn rds_attrs() -> Map<String, Value> {
        as_map(json!({
            "instanceTypeFamily": "M5d",
            "memory": "128 GiB",
            "vcpu": "32",
            "instanceType": "db.m5d.8xlarge",
            "usagetype": "APN1-Multi-AZUsage:db.m5d.8xl",
            "locationType": "AWS Region",
            "storage": "2 x 600 NVMe SSD",
            "normalizationSizeFactor": "128",
            "instanceFamily": "General purpose",
            "databaseEngine": "PostgreSQL",
            "regionCode": "ap-northeast-1",
            "servicecode": "AmazonRDS",
            "licenseModel": "No license required",
            "deploymentOption": "Multi-AZ",
            "location": "Asia Pacific (Tokyo)",
            "servicename": "Amazon Relational Database Service",
            "operation": "CreateDBInstance:0014"
        }))
    }

    #[test]
    fn database_optional_fields_fall_back_to_unknown() {
        let Attributes::Database(a) =
            map_attributes(ServiceCode::Rds, "SKU1", &rds_attrs()).unwrap()
        else {
            panic!("expected database attributes");
        };
        assert_eq!(a.engine, "PostgreSQL");
        assert_eq!(a.deployment_option, "Multi-AZ");
        assert_eq!(a.engine_code, UNKNOWN);
        assert_eq!(a.database_edition, UNKNOWN);
        assert_eq!(a.physical_processor, UNKNOWN);
        assert_eq!(a.network_performance, UNKNOWN);
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let mut attrs = rds_attrs();
        attrs.remove("deploymentOption");
        match map_attributes(ServiceCode::Rds, "SKU1", &attrs) {
            Err(NormalizeError::MissingField { service, sku, field }) => {
                assert_eq!(service, ServiceCode::Rds);
                assert_eq!(sku, "SKU1");
                assert_eq!(field, "deploymentOption");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn cache_engine_maps_to_engine() {
        let attrs = as_map(json!({
            "memory": "13.07 GiB",
            "vcpu": "2",
            "instanceType": "cache.r5.large",
            "usagetype": "EUW3-NodeUsage:cache.r5.large",
            "locationType": "AWS Region",
            "instanceFamily": "Memory optimized",
            "cacheEngine": "Memcached",
            "regionCode": "eu-west-3",
            "currentGeneration": "Yes",
            "networkPerformance": "Up to 10 Gigabit",
            "location": "EU (Paris)",
            "servicename": "Amazon ElastiCache",
            "operation": "CreateCacheCluster:0001"
        }));
        let mapped = map_attributes(ServiceCode::ElastiCache, "SKU2", &attrs).unwrap();
        assert_eq!(mapped.engine(), "Memcached");
        assert!(matches!(mapped, Attributes::Cache(_)));
    }

    #[test]
    fn cache_has_no_optional_fields() {
        let attrs = as_map(json!({ "memory": "1 GiB", "vcpu": "1" }));
        assert!(matches!(
            map_attributes(ServiceCode::ElastiCache, "SKU3", &attrs),
            Err(NormalizeError::MissingField { field: "instanceType", .. })
        ));
    }
}
