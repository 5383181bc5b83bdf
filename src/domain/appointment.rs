//! Appointment domain model

use super::common::StringUuid;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Every appointment slot is a fixed two hours; the end time is derived
/// from the start and never settable by the caller.
pub fn appointment_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::hours(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for AppointmentStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for AppointmentStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for AppointmentStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> std::result::Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Appointment entity; references the estimate it was booked from
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub estimate_id: StringUuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub deposit_paid: bool,
}

/// Request body for scheduling against an approved estimate
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleAppointmentInput {
    pub estimate_id: StringUuid,
    pub start_time: DateTime<Utc>,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub tenant_id: StringUuid,
    pub estimate_id: StringUuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_appointment_end_is_two_hours_after_start() {
        let start = Utc.with_ymd_and_hms(2025, 6, 12, 9, 0, 0).unwrap();
        let end = appointment_end(start);
        assert_eq!((end - start).num_hours(), 2);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "cancelled".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Cancelled
        );
        assert!("missed".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_default() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }
}
