mod attributes;
pub mod client;
mod terms;

#[cfg(test)]
pub(crate) mod fixtures;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::types::{PriceRecord, ServiceCode};

pub use client::{AwsPriceList, PageCursor, PriceListSource, ProductFilters};
pub use terms::{offer_term_key, rate_code_key};
use terms::Terms;

/// One element of `GetProducts.PriceList`. Attributes stay untyped here;
/// their shape depends on the service code. `terms` is only decoded for
/// entries that survive the instance check.
#[derive(Debug, Deserialize)]
struct PriceListEntry {
    product: Product,
    #[serde(default)]
    terms: Value,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(rename = "productFamily")]
    product_family: Option<String>,
    sku: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

fn is_absent(attrs: &Map<String, Value>, key: &str) -> bool {
    matches!(attrs.get(key), None | Some(Value::Null))
}

/// Normalize one raw Price List entry.
///
/// `Ok(None)` means the entry is not an instance SKU (no vCPU or memory) or
/// has no on-demand offering, and is skipped.
pub fn normalize_entry(
    service: ServiceCode,
    raw: &str,
) -> Result<Option<PriceRecord>, NormalizeError> {
    let entry: PriceListEntry = serde_json::from_str(raw)?;
    let attrs = &entry.product.attributes;

    // Data transfer, storage and other non-instance line items.
    if is_absent(attrs, "vcpu") || is_absent(attrs, "memory") {
        return Ok(None);
    }

    let missing = |sku: &str, field| NormalizeError::MissingField {
        service,
        sku: sku.to_string(),
        field,
    };

    let sku = entry.product.sku.ok_or_else(|| missing("?", "sku"))?;
    let product_family = entry
        .product
        .product_family
        .ok_or_else(|| missing(&sku, "productFamily"))?;

    let offer_terms: Terms = match entry.terms {
        Value::Null => Terms::default(),
        raw => serde_json::from_value(raw)?,
    };
    let Some(price) = offer_terms.on_demand_usd(&sku)? else {
        return Ok(None);
    };

    let attributes = attributes::map_attributes(service, &sku, attrs)?;

    Ok(Some(PriceRecord {
        service_code: service,
        sku,
        product_family,
        attributes,
        on_demand_price_per_usd: price,
    }))
}

/// Normalize every entry of one page into `out`. Returns how many records
/// the page contributed. The first bad entry aborts the page.
pub fn normalize_page(
    service: ServiceCode,
    entries: &[String],
    out: &mut Vec<PriceRecord>,
) -> Result<usize, NormalizeError> {
    let before = out.len();
    for raw in entries {
        if let Some(record) = normalize_entry(service, raw)? {
            out.push(record);
        }
    }
    Ok(out.len() - before)
}
