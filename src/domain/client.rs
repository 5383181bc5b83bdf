//! Client (customer contact) domain model

use super::common::StringUuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Tenant-scoped customer contact
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Input for creating a client contact
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Validate phone format (digits, spaces, dashes, optional leading +)
fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_phone"))
    }
}

lazy_static::lazy_static! {
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ().-]{6,19}$").unwrap();
}
