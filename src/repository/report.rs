//! Service report repository

use crate::domain::{NewServiceReport, ServiceReport, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, input: &NewServiceReport) -> Result<ServiceReport>;
    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<ServiceReport>>;
}

pub struct ReportRepositoryImpl {
    pool: MySqlPool,
}

impl ReportRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const REPORT_COLUMNS: &str = "id, tenant_id, assessment_id, client_id, vehicle_id, services_performed, total_cost, document_ref, created_at";

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn create(&self, input: &NewServiceReport) -> Result<ServiceReport> {
        let id = StringUuid::new_v4();
        let services_json = serde_json::to_string(&input.services_performed)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO service_reports
                (id, tenant_id, assessment_id, client_id, vehicle_id, services_performed, total_cost, document_ref, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NOW(3))
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.assessment_id)
        .bind(input.client_id)
        .bind(input.vehicle_id)
        .bind(&services_json)
        .bind(input.total_cost)
        .bind(&input.document_ref)
        .execute(&self.pool)
        .await?;

        self.find_by_id(input.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create service report")))
    }

    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<ServiceReport>> {
        let report = sqlx::query_as::<_, ServiceReport>(&format!(
            "SELECT {} FROM service_reports WHERE tenant_id = ? AND id = ?",
            REPORT_COLUMNS
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_report_repository_scoped_lookup() {
        let mut mock = MockReportRepository::new();
        let tenant_id = StringUuid::new_v4();
        let id = StringUuid::new_v4();

        mock.expect_find_by_id()
            .with(eq(tenant_id), eq(id))
            .returning(|_, _| Ok(None));

        let result = mock.find_by_id(tenant_id, id).await.unwrap();
        assert!(result.is_none());
    }
}
