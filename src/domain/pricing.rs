//! Tenant price list and the estimate pricing calculator

use super::vehicle::VehicleSize;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Per-size price multipliers for a single service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeMultiplier {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl SizeMultiplier {
    pub fn for_size(&self, size: VehicleSize) -> f64 {
        match size {
            VehicleSize::Small => self.small,
            VehicleSize::Medium => self.medium,
            VehicleSize::Large => self.large,
        }
    }
}

impl Default for SizeMultiplier {
    fn default() -> Self {
        Self {
            small: 1.0,
            medium: 1.0,
            large: 1.0,
        }
    }
}

/// One configured service in a tenant's price list.
/// Service names are unique within a tenant's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub service_name: String,
    pub base_price: f64,
    pub size_multiplier: SizeMultiplier,
}

/// Line item of a tenant's cost-of-goods list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub item_name: String,
    pub cost: f64,
}

/// Compute the total price for a set of requested services on a vehicle
/// of the given size: the sum of `base_price * size_multiplier[size]`
/// over each requested service.
///
/// A requested service missing from the price list is a validation
/// error naming the service, so a typo cannot silently drop a line item
/// from the quote.
pub fn compute_total(
    price_list: &[PriceEntry],
    services: &[String],
    size: VehicleSize,
) -> Result<f64> {
    let mut total = 0.0;
    for service in services {
        let entry = price_list
            .iter()
            .find(|p| p.service_name == *service)
            .ok_or_else(|| {
                AppError::Validation(format!("Service '{}' is not in the price list", service))
            })?;
        total += entry.base_price * entry.size_multiplier.for_size(size);
    }
    Ok(total)
}
