//! Vehicle repository

use crate::domain::{AddVehicleInput, StringUuid, Vehicle};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, tenant_id: StringUuid, input: &AddVehicleInput) -> Result<Vehicle>;
    async fn find_by_id(&self, tenant_id: StringUuid, id: StringUuid) -> Result<Option<Vehicle>>;
    async fn list_by_client(
        &self,
        tenant_id: StringUuid,
        client_id: StringUuid,
    ) -> Result<Vec<Vehicle>>;
}

pub struct VehicleRepositoryImpl {
    pool: MySqlPool,
}

impl VehicleRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for VehicleRepositoryImpl {
    async fn create(&self, tenant_id: StringUuid, input: &AddVehicleInput) -> Result<Vehicle> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO vehicles (id, tenant_id, client_id, make, model, year, size)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(input.client_id)
        .bind(&input.make)
        .bind(&input.model)
        .bind(input.year)
        .bind(input.size)
        .execute(&self.pool)
        .await?;

        self.find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create vehicle")))
    }

    async fn find_by_id(&self, tenant_id: StringUuid, id: StringUuid) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, tenant_id, client_id, make, model, year, size
            FROM vehicles
            WHERE tenant_id = ? AND id = ?
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn list_by_client(
        &self,
        tenant_id: StringUuid,
        client_id: StringUuid,
    ) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, tenant_id, client_id, make, model, year, size
            FROM vehicles
            WHERE tenant_id = ? AND client_id = ?
            ORDER BY make, model
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }
}
