//! Appointment repository

use crate::domain::{Appointment, AppointmentStatus, NewAppointment, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, input: &NewAppointment) -> Result<Appointment>;
    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<Appointment>>;
    async fn list_upcoming(
        &self,
        tenant_id: StringUuid,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Appointment>>;
    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: AppointmentStatus,
    ) -> Result<Appointment>;
    async fn set_deposit_paid(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        paid: bool,
    ) -> Result<Appointment>;
}

pub struct AppointmentRepositoryImpl {
    pool: MySqlPool,
}

impl AppointmentRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const APPOINTMENT_COLUMNS: &str =
    "id, tenant_id, estimate_id, start_time, end_time, status, deposit_paid";

#[async_trait]
impl AppointmentRepository for AppointmentRepositoryImpl {
    async fn create(&self, input: &NewAppointment) -> Result<Appointment> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO appointments (id, tenant_id, estimate_id, start_time, end_time, status, deposit_paid)
            VALUES (?, ?, ?, ?, ?, 'scheduled', FALSE)
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.estimate_id)
        .bind(input.start_time)
        .bind(input.end_time)
        .execute(&self.pool)
        .await?;

        self.find_by_id(input.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create appointment")))
    }

    async fn find_by_id(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
    ) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {} FROM appointments WHERE tenant_id = ? AND id = ?",
            APPOINTMENT_COLUMNS
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn list_upcoming(
        &self,
        tenant_id: StringUuid,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            SELECT {}
            FROM appointments
            WHERE tenant_id = ? AND status = 'scheduled' AND start_time > ?
            ORDER BY start_time ASC
            LIMIT ?
            "#,
            APPOINTMENT_COLUMNS
        ))
        .bind(tenant_id)
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    async fn update_status(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
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
            return Err(AppError::NotFound(format!("Appointment {} not found", id)));
        }

        self.find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update appointment")))
    }

    async fn set_deposit_paid(
        &self,
        tenant_id: StringUuid,
        id: StringUuid,
        paid: bool,
    ) -> Result<Appointment> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET deposit_paid = ?
            WHERE tenant_id = ? AND id = ?
            "#,
        )
        .bind(paid)
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Appointment {} not found", id)));
        }

        self.find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update appointment")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_appointment_repository_scoped_lookup() {
        let mut mock = MockAppointmentRepository::new();
        let tenant_id = StringUuid::new_v4();
        let id = StringUuid::new_v4();

        mock.expect_find_by_id()
            .with(eq(tenant_id), eq(id))
            .returning(|_, _| Ok(None));

        let result = mock.find_by_id(tenant_id, id).await.unwrap();
        assert!(result.is_none());
    }
}
