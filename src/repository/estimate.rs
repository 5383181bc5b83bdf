//! Estimate repository

use crate::domain::{Estimate, EstimateStatus, NewEstimate, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EstimateRepository: Send + Sync {
    async fn create(&self, input: &NewEstimate) -> Result<Estimate>;
    /// Unscoped lookup. Callers must compare the returned row's
    /// tenant_id against the caller's to distinguish a missing estimate
    /// from a cross-tenant one; never return the row itself to a caller
    /// before that check.
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Estimate>>;
    async fn list_recent(&self, tenant_id: StringUuid, limit: i64) -> Result<Vec<Estimate>>;
    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: EstimateStatus,
    ) -> Result<Estimate>;
}

pub struct EstimateRepositoryImpl {
    pool: MySqlPool,
}

impl EstimateRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const ESTIMATE_COLUMNS: &str =
    "id, tenant_id, client_id, vehicle_id, services, total_price, status, created_at";

#[async_trait]
impl EstimateRepository for EstimateRepositoryImpl {
    async fn create(&self, input: &NewEstimate) -> Result<Estimate> {
        let id = StringUuid::new_v4();
        let services_json =
            serde_json::to_string(&input.services).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO estimates (id, tenant_id, client_id, vehicle_id, services, total_price, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, NOW(3))
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.client_id)
        .bind(input.vehicle_id)
        .bind(&services_json)
        .bind(input.total_price)
        .bind(input.status)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create estimate")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Estimate>> {
        let estimate = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {} FROM estimates WHERE id = ?",
            ESTIMATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(estimate)
    }

    async fn list_recent(&self, tenant_id: StringUuid, limit: i64) -> Result<Vec<Estimate>> {
        let estimates = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {} FROM estimates WHERE tenant_id = ? ORDER BY created_at DESC LIMIT ?",
            ESTIMATE_COLUMNS
        ))
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(estimates)
    }

    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: EstimateStatus,
    ) -> Result<Estimate> {
        let result = sqlx::query(
            r#"
            UPDATE estimates
            SET status = ?
            WHERE tenant_id = ? AND id = ?
            "#,
        )
        .bind(status)
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Estimate {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update estimate")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_estimate_repository() {
        let mut mock = MockEstimateRepository::new();
        let estimate = Estimate {
            id: StringUuid::new_v4(),
            tenant_id: StringUuid::new_v4(),
            client_id: StringUuid::new_v4(),
            vehicle_id: StringUuid::new_v4(),
            services: vec!["wash".to_string()],
            total_price: 100.0,
            status: EstimateStatus::Pending,
            created_at: Utc::now(),
        };
        let estimate_clone = estimate.clone();

        mock.expect_find_by_id()
            .with(eq(estimate.id))
            .returning(move |_| Ok(Some(estimate_clone.clone())));

        let found = mock.find_by_id(estimate.id).await.unwrap().unwrap();
        assert_eq!(found.total_price, 100.0);
    }
}
