//! Service report domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Report of the work performed after an assessment, with a rendered
/// document in the blob store. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceReport {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub assessment_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    #[sqlx(json)]
    pub services_performed: Vec<String>,
    pub total_cost: f64,
    /// Blob-store reference of the rendered PDF
    pub document_ref: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for report generation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateReportInput {
    pub assessment_id: StringUuid,
    #[validate(length(min = 1))]
    pub services_performed: Vec<String>,
    #[validate(range(min = 0.0))]
    pub total_cost: f64,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewServiceReport {
    pub tenant_id: StringUuid,
    pub assessment_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub services_performed: Vec<String>,
    pub total_cost: f64,
    pub document_ref: String,
}
