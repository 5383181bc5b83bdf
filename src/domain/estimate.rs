//! Estimate domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estimate status; transitions out of Pending happen only through
/// manager action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::str::FromStr for EstimateStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(EstimateStatus::Pending),
            "approved" => Ok(EstimateStatus::Approved),
            "rejected" => Ok(EstimateStatus::Rejected),
            _ => Err(format!("Unknown estimate status: {}", s)),
        }
    }
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateStatus::Pending => write!(f, "pending"),
            EstimateStatus::Approved => write!(f, "approved"),
            EstimateStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for EstimateStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for EstimateStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for EstimateStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> std::result::Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Estimate entity: a priced quote for a set of services on a vehicle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Estimate {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    #[sqlx(json)]
    pub services: Vec<String>,
    pub total_price: f64,
    pub status: EstimateStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for estimate generation; the total is computed
/// server-side from the tenant's price list and the vehicle's size.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateEstimateInput {
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub services: Vec<String>,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub services: Vec<String>,
    pub total_price: f64,
    pub status: EstimateStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "approved".parse::<EstimateStatus>().unwrap(),
            EstimateStatus::Approved
        );
        assert!("archived".parse::<EstimateStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(EstimateStatus::default(), EstimateStatus::Pending);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&EstimateStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }
}
