//! Vehicle assessment repository

use crate::domain::{NewAssessment, StringUuid, VehicleAssessment};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn create(&self, input: &NewAssessment) -> Result<VehicleAssessment>;
    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<VehicleAssessment>>;
}

pub struct AssessmentRepositoryImpl {
    pool: MySqlPool,
}

impl AssessmentRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// `condition` is a reserved word in MySQL, hence the backticks.
const ASSESSMENT_COLUMNS: &str = "id, tenant_id, client_id, vehicle_id, image_ref, description, `condition`, recommended_services, embedding, created_at";

#[async_trait]
impl AssessmentRepository for AssessmentRepositoryImpl {
    async fn create(&self, input: &NewAssessment) -> Result<VehicleAssessment> {
        let id = StringUuid::new_v4();
        let recommended_json = serde_json::to_string(&input.recommended_services)
            .map_err(|e| AppError::Internal(e.into()))?;
        let embedding_json =
            serde_json::to_string(&input.embedding).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO vehicle_assessments
                (id, tenant_id, client_id, vehicle_id, image_ref, description, `condition`, recommended_services, embedding, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(3))
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.client_id)
        .bind(input.vehicle_id)
        .bind(&input.image_ref)
        .bind(&input.description)
        .bind(&input.condition)
        .bind(&recommended_json)
        .bind(&embedding_json)
        .execute(&self.pool)
        .await?;

        self.find_by_id(input.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create assessment")))
    }

    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<VehicleAssessment>> {
        let assessment = sqlx::query_as::<_, VehicleAssessment>(&format!(
            "SELECT {} FROM vehicle_assessments WHERE tenant_id = ? AND id = ?",
            ASSESSMENT_COLUMNS
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assessment)
    }
}
