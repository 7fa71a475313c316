use crate::error::CostError;

/// Billing hours in a month, as AWS uses for monthly estimates.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Monthly USD cost for an hourly price string, rounded to cents.
pub fn hourly_to_monthly(hourly: &str) -> Result<String, CostError> {
    let rate: f64 = hourly.trim().parse().map_err(|source| CostError {
        price: hourly.to_string(),
        source,
    })?;
    Ok(format!("{:.2}", rate * HOURS_PER_MONTH))
}
