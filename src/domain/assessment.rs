//! AI vehicle assessment domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored result of one vehicle-photo analysis. Written once when the
/// image is processed, immutable thereafter. The embedding vector is
/// opaque to this service; it is produced by the external embedding
/// model and only stored for similarity search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleAssessment {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    /// Blob-store reference of the uploaded photo
    pub image_ref: String,
    pub description: String,
    pub condition: String,
    #[sqlx(json)]
    pub recommended_services: Vec<String>,
    #[sqlx(json)]
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub vehicle_id: StringUuid,
    pub image_ref: String,
    pub description: String,
    pub condition: String,
    pub recommended_services: Vec<String>,
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_serialization() {
        let assessment = VehicleAssessment {
            id: StringUuid::new_v4(),
            tenant_id: StringUuid::new_v4(),
            client_id: StringUuid::new_v4(),
            vehicle_id: StringUuid::new_v4(),
            image_ref: "ab12.jpg".to_string(),
            description: "Silver sedan, light road film".to_string(),
            condition: "good".to_string(),
            recommended_services: vec!["wash".to_string(), "clay bar".to_string()],
            embedding: vec![0.1, -0.2, 0.3],
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&assessment).unwrap();
        assert!(json.contains("clay bar"));
        assert!(json.contains("-0.2"));
    }
}
