use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::query::PricedRecord;
use crate::types::{Attributes, ServiceCode};

const EC2_HEADER: &[&str] = &[
    "Service",
    "Region",
    "OS/Engine",
    "InstanceType",
    "vCPU",
    "Memory",
    "PhysicalProcessor",
    "ClockSpeed(GHz)",
    "Tenancy",
    "CapacityStatus",
    "PreInstalledSw",
    "ProcessorArchitecture",
    "OnDemandPrice(USD/hour)",
    "OnDemandPrice(USD/month)",
];

const RDS_HEADER: &[&str] = &[
    "Service",
    "Region",
    "OS/Engine",
    "InstanceType",
    "vCPU",
    "Memory",
    "DeploymentOption",
    "Storage",
    "OnDemandPrice(USD/hour)",
    "OnDemandPrice(USD/month)",
];

const ELASTICACHE_HEADER: &[&str] = &[
    "Service",
    "Region",
    "OS/Engine",
    "InstanceType",
    "vCPU",
    "Memory",
    "OnDemandPrice(USD/hour)",
    "OnDemandPrice(USD/month)",
];

pub fn header(service: ServiceCode) -> &'static [&'static str] {
    match service {
        ServiceCode::Ec2 => EC2_HEADER,
        ServiceCode::Rds => RDS_HEADER,
        ServiceCode::ElastiCache => ELASTICACHE_HEADER,
    }
}

fn row(priced: &PricedRecord) -> Vec<String> {
    let r = &priced.record;
    let a = &r.attributes;
    let mut cells = vec![
        r.service_code.to_string(),
        a.region_code().to_string(),
        a.engine().to_string(),
        a.instance_type().to_string(),
        a.vcpu().to_string(),
        a.memory().to_string(),
    ];
    match a {
        Attributes::Compute(c) => cells.extend([
            c.physical_processor.clone(),
            c.clock_speed.clone(),
            c.tenancy.clone(),
            c.capacity_status.clone(),
            c.pre_installed_sw.clone(),
            c.processor_architecture.clone(),
        ]),
        Attributes::Database(d) => {
            cells.extend([d.deployment_option.clone(), d.storage.clone()])
        }
        Attributes::Cache(_) => {}
    }
    cells.push(r.on_demand_price_per_usd.clone());
    cells.push(priced.monthly_usd.clone());
    cells
}

pub fn render_table(service: ServiceCode, rows: &[PricedRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(service).iter().map(|h| Cell::new(*h)));

    for priced in rows {
        table.add_row(row(priced));
    }
    table
}

pub fn print_table(service: ServiceCode, rows: &[PricedRecord]) {
    println!("{}", render_table(service, rows));
}

pub fn print_json(rows: &[PricedRecord]) -> anyhow::Result<()> {
    let json: Vec<serde_json::Value> = rows
        .iter()
        .map(|p| {
            serde_json::json!({
                "service_code": p.record.service_code,
                "sku": p.record.sku,
                "product_family": p.record.product_family,
                "attributes": p.record.attributes,
                "on_demand_price_per_usd": p.record.on_demand_price_per_usd,
                "on_demand_price_per_month_usd": p.monthly_usd,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
