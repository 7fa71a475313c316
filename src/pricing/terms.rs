use std::collections::HashMap;

use serde::Deserialize;

use crate::error::NormalizeError;

/// Offer term code of the on-demand term. Stable across services and regions.
pub const ON_DEMAND_OFFER_TERM_CODE: &str = "JRTCKXETXF";
/// Rate code of the single price dimension inside the on-demand term.
pub const ON_DEMAND_RATE_CODE: &str = "6YS6EN2CT7";

/// The part of an entry's `terms` block needed to find the on-demand price.
/// Reserved terms are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Terms {
    #[serde(rename = "OnDemand", default)]
    on_demand: Option<HashMap<String, OfferTerm>>,
}

#[derive(Debug, Deserialize)]
struct OfferTerm {
    #[serde(rename = "priceDimensions", default)]
    price_dimensions: HashMap<String, PriceDimension>,
}

#[derive(Debug, Deserialize)]
struct PriceDimension {
    #[serde(rename = "pricePerUnit", default)]
    price_per_unit: HashMap<String, String>,
}

pub fn offer_term_key(sku: &str) -> String {
    format!("{sku}.{ON_DEMAND_OFFER_TERM_CODE}")
}

pub fn rate_code_key(sku: &str) -> String {
    format!("{sku}.{ON_DEMAND_OFFER_TERM_CODE}.{ON_DEMAND_RATE_CODE}")
}

impl Terms {
    /// USD/hour on-demand price for `sku`.
    ///
    /// `Ok(None)` when the entry has no on-demand term at all. Once the
    /// `OnDemand` node exists, every further link must be there.
    pub fn on_demand_usd(&self, sku: &str) -> Result<Option<String>, NormalizeError> {
        let Some(on_demand) = &self.on_demand else {
            return Ok(None);
        };

        let missing = |key: String| NormalizeError::PriceResolution {
            sku: sku.to_string(),
            key,
        };

        let offer_key = offer_term_key(sku);
        let offer = on_demand.get(&offer_key).ok_or_else(|| missing(offer_key))?;

        let rate_key = rate_code_key(sku);
        let dimension = offer
            .price_dimensions
            .get(&rate_key)
            .ok_or_else(|| missing(format!("priceDimensions.{rate_key}")))?;

        let usd = dimension
            .price_per_unit
            .get("USD")
            .ok_or_else(|| missing("pricePerUnit.USD".to_string()))?;

        Ok(Some(usd.clone()))
    }
}
