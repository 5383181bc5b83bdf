//! Ongoing service (shop-floor job) repository

use crate::domain::{JobStatus, NewOngoingService, OngoingService, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OngoingServiceRepository: Send + Sync {
    async fn create(&self, input: &NewOngoingService) -> Result<OngoingService>;
    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<OngoingService>>;
    async fn list_in_progress(&self, tenant_id: StringUuid) -> Result<Vec<OngoingService>>;
    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: JobStatus,
    ) -> Result<OngoingService>;
}

pub struct OngoingServiceRepositoryImpl {
    pool: MySqlPool,
}

impl OngoingServiceRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const ONGOING_COLUMNS: &str = "id, tenant_id, client_id, vehicle_id, service_name, assigned_staff, status, started_at, estimated_end_at";

#[async_trait]
impl OngoingServiceRepository for OngoingServiceRepositoryImpl {
    async fn create(&self, input: &NewOngoingService) -> Result<OngoingService> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO ongoing_services
                (id, tenant_id, client_id, vehicle_id, service_name, assigned_staff, status, started_at, estimated_end_at)
            VALUES (?, ?, ?, ?, ?, ?, 'in_progress', ?, ?)
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.client_id)
        .bind(input.vehicle_id)
        .bind(&input.service_name)
        .bind(&input.assigned_staff)
        .bind(input.started_at)
        .bind(input.estimated_end_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(input.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create ongoing service")))
    }

    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<OngoingService>> {
        let service = sqlx::query_as::<_, OngoingService>(&format!(
            "SELECT {} FROM ongoing_services WHERE tenant_id = ? AND id = ?",
            ONGOING_COLUMNS
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    async fn list_in_progress(&self, tenant_id: StringUuid) -> Result<Vec<OngoingService>> {
        let services = sqlx::query_as::<_, OngoingService>(&format!(
            r#"
            SELECT {}
            FROM ongoing_services
            WHERE tenant_id = ? AND status = 'in_progress'
            ORDER BY started_at ASC
            "#,
            ONGOING_COLUMNS
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: JobStatus,
    ) -> Result<OngoingService> {
        let result = sqlx::query(
            r#"
            UPDATE ongoing_services
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
            return Err(AppError::NotFound(format!(
                "Ongoing service {} not found",
                id
            )));
        }

        self.find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update ongoing service")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_ongoing_service_repository() {
        let mut mock = MockOngoingServiceRepository::new();
        let tenant_id = StringUuid::new_v4();

        mock.expect_list_in_progress()
            .with(eq(tenant_id))
            .returning(|_| Ok(vec![]));

        let result = mock.list_in_progress(tenant_id).await.unwrap();
        assert!(result.is_empty());
    }
}
