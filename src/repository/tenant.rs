//! Tenant repository

use crate::domain::{CreateTenantInput, StringUuid, Tenant, UpdateTenantSettingsInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, input: &CreateTenantInput) -> Result<Tenant>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Tenant>>;
    async fn find_by_owner(&self, owner_user_id: &str) -> Result<Option<Tenant>>;
    async fn update_settings(
        &self,
        id: StringUuid,
        input: &UpdateTenantSettingsInput,
    ) -> Result<Tenant>;
}

pub struct TenantRepositoryImpl {
    pool: MySqlPool,
}

impl TenantRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const TENANT_COLUMNS: &str =
    "id, name, owner_user_id, price_list, cost_of_goods, labor_cost, qr_payload, created_at, updated_at";

#[async_trait]
impl TenantRepository for TenantRepositoryImpl {
    async fn create(&self, input: &CreateTenantInput) -> Result<Tenant> {
        let price_list_json =
            serde_json::to_string(&input.price_list).map_err(|e| AppError::Internal(e.into()))?;
        let cost_of_goods_json = serde_json::to_string(&input.cost_of_goods)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO tenants (id, name, owner_user_id, price_list, cost_of_goods, labor_cost, qr_payload, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, NOW(3), NOW(3))
            "#,
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.owner_user_id)
        .bind(&price_list_json)
        .bind(&cost_of_goods_json)
        .bind(input.labor_cost)
        .bind(&input.qr_payload)
        .execute(&self.pool)
        .await?;

        self.find_by_id(input.id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create tenant")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {} FROM tenants WHERE id = ?",
            TENANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn find_by_owner(&self, owner_user_id: &str) -> Result<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {} FROM tenants WHERE owner_user_id = ?",
            TENANT_COLUMNS
        ))
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn update_settings(
        &self,
        id: StringUuid,
        input: &UpdateTenantSettingsInput,
    ) -> Result<Tenant> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", id)))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let price_list = input.price_list.as_ref().unwrap_or(&existing.price_list);
        let cost_of_goods = input
            .cost_of_goods
            .as_ref()
            .unwrap_or(&existing.cost_of_goods);
        let labor_cost = input.labor_cost.unwrap_or(existing.labor_cost);
        let qr_payload = input.qr_payload.as_ref().unwrap_or(&existing.qr_payload);

        let price_list_json =
            serde_json::to_string(price_list).map_err(|e| AppError::Internal(e.into()))?;
        let cost_of_goods_json =
            serde_json::to_string(cost_of_goods).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            UPDATE tenants
            SET name = ?, price_list = ?, cost_of_goods = ?, labor_cost = ?, qr_payload = ?, updated_at = NOW(3)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(&price_list_json)
        .bind(&cost_of_goods_json)
        .bind(labor_cost)
        .bind(qr_payload)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update tenant")))
    }
}
