//! Price List entries shaped like real `GetProducts` output.

use serde_json::json;

use super::{offer_term_key, rate_code_key};

fn on_demand_terms(sku: &str, usd: &str) -> serde_json::Value {
    json!({
        "OnDemand": {
            offer_term_key(sku): {
                "offerTermCode": "JRTCKXETXF",
                "sku": sku,
                "effectiveDate": "2024-06-01T00:00:00Z",
                "priceDimensions": {
                    rate_code_key(sku): {
                        "unit": "Hrs",
                        "endRange": "Inf",
                        "description": "on-demand hourly rate",
                        "appliesTo": [],
                        "rateCode": rate_code_key(sku),
                        "beginRange": "0",
                        "pricePerUnit": { "USD": usd }
                    }
                },
                "termAttributes": {}
            }
        }
    })
}

/// Linux, shared tenancy compute SKU in ap-northeast-1. `gpuMemory` is
/// deliberately absent.
pub fn compute_entry(sku: &str, instance_type: &str, usd: &str) -> String {
    json!({
        "product": {
            "productFamily": "Compute Instance",
            "attributes": {
                "enhancedNetworkingSupported": "Yes",
                "intelTurboAvailable": "Yes",
                "memory": "4 GiB",
                "dedicatedEbsThroughput": "Up to 10000 Mbps",
                "vcpu": "2",
                "classicnetworkingsupport": "false",
                "capacitystatus": "Used",
                "locationType": "AWS Region",
                "storage": "EBS only",
                "instanceFamily": "Compute optimized",
                "operatingSystem": "Linux",
                "intelAvx2Available": "Yes",
                "regionCode": "ap-northeast-1",
                "physicalProcessor": "Intel Xeon 8375C (Ice Lake)",
                "clockSpeed": "3.5 GHz",
                "ecu": "NA",
                "networkPerformance": "Up to 12500 Megabit",
                "servicename": "Amazon Elastic Compute Cloud",
                "vpcnetworkingsupport": "true",
                "instanceType": instance_type,
                "tenancy": "Shared",
                "usagetype": format!("APN1-BoxUsage:{instance_type}"),
                "normalizationSizeFactor": "4",
                "intelAvxAvailable": "Yes",
                "processorFeatures": "Intel AVX; Intel AVX2; Intel AVX512; Intel Turbo",
                "servicecode": "AmazonEC2",
                "licenseModel": "No License required",
                "currentGeneration": "Yes",
                "preInstalledSw": "NA",
                "location": "Asia Pacific (Tokyo)",
                "processorArchitecture": "64-bit",
                "marketoption": "OnDemand",
                "operation": "RunInstances",
                "availabilityzone": "NA"
            },
            "sku": sku
        },
        "serviceCode": "AmazonEC2",
        "terms": on_demand_terms(sku, usd),
        "version": "20240601000000",
        "publicationDate": "2024-06-01T00:00:00Z"
    })
    .to_string()
}

pub fn database_entry(sku: &str, instance_type: &str, engine: &str, usd: &str) -> String {
    json!({
        "product": {
            "productFamily": "Database Instance",
            "attributes": {
                "engineCode": "14",
                "instanceTypeFamily": "M5",
                "memory": "8 GiB",
                "vcpu": "2",
                "instanceType": instance_type,
                "usagetype": format!("APN1-InstanceUsage:{instance_type}"),
                "locationType": "AWS Region",
                "storage": "EBS Only",
                "normalizationSizeFactor": "4",
                "instanceFamily": "General purpose",
                "databaseEngine": engine,
                "regionCode": "ap-northeast-1",
                "servicecode": "AmazonRDS",
                "physicalProcessor": "Intel Xeon Platinum 8175",
                "licenseModel": "No license required",
                "currentGeneration": "Yes",
                "networkPerformance": "Up to 10 Gbps",
                "deploymentOption": "Single-AZ",
                "location": "Asia Pacific (Tokyo)",
                "servicename": "Amazon Relational Database Service",
                "processorArchitecture": "64-bit",
                "operation": "CreateDBInstance:0014"
            },
            "sku": sku
        },
        "serviceCode": "AmazonRDS",
        "terms": on_demand_terms(sku, usd)
    })
    .to_string()
}

pub fn cache_entry(sku: &str, instance_type: &str, engine: &str, usd: &str) -> String {
    json!({
        "product": {
            "productFamily": "Cache Instance",
            "attributes": {
                "memory": "6.38 GiB",
                "vcpu": "2",
                "instanceType": instance_type,
                "usagetype": format!("APN1-NodeUsage:{instance_type}"),
                "locationType": "AWS Region",
                "instanceFamily": "Standard",
                "cacheEngine": engine,
                "regionCode": "ap-northeast-1",
                "servicecode": "AmazonElastiCache",
                "currentGeneration": "Yes",
                "networkPerformance": "Up to 10 Gigabit",
                "location": "Asia Pacific (Tokyo)",
                "servicename": "Amazon ElastiCache",
                "operation": "CreateCacheCluster:0002"
            },
            "sku": sku
        },
        "serviceCode": "AmazonElastiCache",
        "terms": on_demand_terms(sku, usd)
    })
    .to_string()
}
