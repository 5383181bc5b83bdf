//! Ongoing service (live shop-floor job) domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    InProgress,
    Completed,
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Completed => write!(f, "completed"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for JobStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for JobStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for JobStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> std::result::Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// A job currently on the shop floor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OngoingService {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub service_name: String,
    pub assigned_staff: String,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub estimated_end_at: DateTime<Utc>,
}

/// Request body for starting a job
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartServiceInput {
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub service_name: String,
    #[validate(length(min = 1, max = 255))]
    pub assigned_staff: String,
    /// Expected duration of the job, in minutes
    #[validate(range(min = 1, max = 1440))]
    pub estimated_duration_minutes: i64,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewOngoingService {
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub service_name: String,
    pub assigned_staff: String,
    pub started_at: DateTime<Utc>,
    pub estimated_end_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_job_status_parse() {
        assert_eq!(
            "in_progress".parse::<JobStatus>().unwrap(),
            JobStatus::InProgress
        );
        assert!("paused".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_start_service_input_validation() {
        let input = StartServiceInput {
            client_id: StringUuid::new_v4(),
            vehicle_id: StringUuid::new_v4(),
            service_name: "interior detail".to_string(),
            assigned_staff: "Marcus".to_string(),
            estimated_duration_minutes: 90,
        };
        assert!(input.validate().is_ok());

        let too_long = StartServiceInput {
            estimated_duration_minutes: 10_000,
            ..input
        };
        assert!(too_long.validate().is_err());
    }
}
