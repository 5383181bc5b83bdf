//! Vehicle domain model

use super::common::StringUuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Size category driving the pricing multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleSize {
    Small,
    Medium,
    Large,
}

impl std::str::FromStr for VehicleSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(VehicleSize::Small),
            "medium" => Ok(VehicleSize::Medium),
            "large" => Ok(VehicleSize::Large),
            _ => Err(format!("Unknown vehicle size: {}", s)),
        }
    }
}

impl std::fmt::Display for VehicleSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleSize::Small => write!(f, "small"),
            VehicleSize::Medium => write!(f, "medium"),
            VehicleSize::Large => write!(f, "large"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for VehicleSize {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for VehicleSize {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for VehicleSize {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> std::result::Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Vehicle entity; belongs to a client within a tenant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub size: VehicleSize,
}

/// Input for registering a vehicle under a client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddVehicleInput {
    pub client_id: StringUuid,
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    pub size: VehicleSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_vehicle_size_parse() {
        assert_eq!("small".parse::<VehicleSize>().unwrap(), VehicleSize::Small);
        assert_eq!("LARGE".parse::<VehicleSize>().unwrap(), VehicleSize::Large);
        assert!("gigantic".parse::<VehicleSize>().is_err());
    }

    #[test]
    fn test_vehicle_size_serde() {
        let json = serde_json::to_string(&VehicleSize::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: VehicleSize = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(back, VehicleSize::Large);
    }

    #[test]
    fn test_add_vehicle_input_validation() {
        let input = AddVehicleInput {
            client_id: StringUuid::new_v4(),
            make: "Toyota".to_string(),
            model: "Tacoma".to_string(),
            year: 2019,
            size: VehicleSize::Large,
        };
        assert!(input.validate().is_ok());

        let bad_year = AddVehicleInput { year: 1850, ..input };
        assert!(bad_year.validate().is_err());
    }
}
