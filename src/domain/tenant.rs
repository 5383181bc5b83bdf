//! Tenant domain model
//!
//! The tenant is the root of data partitioning: every other entity
//! carries its tenant's id and is invisible outside that partition.

use super::common::StringUuid;
use super::pricing::{CostItem, PriceEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Tenant entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: StringUuid,
    pub name: String,
    /// Identity-provider subject of the owning user
    pub owner_user_id: String,
    #[sqlx(json)]
    pub price_list: Vec<PriceEntry>,
    #[sqlx(json)]
    pub cost_of_goods: Vec<CostItem>,
    pub labor_cost: f64,
    /// Payload encoded into the tenant's booking QR code
    pub qr_payload: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a tenant. Built internally on an owner's first
/// sign-in; the id is generated up front so the QR payload can embed it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenantInput {
    pub id: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub owner_user_id: String,
    pub price_list: Vec<PriceEntry>,
    pub cost_of_goods: Vec<CostItem>,
    #[validate(range(min = 0.0))]
    pub labor_cost: f64,
    pub qr_payload: String,
}

/// Input for the settings forms: every field optional, absent fields
/// keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTenantSettingsInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub price_list: Option<Vec<PriceEntry>>,
    pub cost_of_goods: Option<Vec<CostItem>>,
    #[validate(range(min = 0.0))]
    pub labor_cost: Option<f64>,
    pub qr_payload: Option<String>,
}
