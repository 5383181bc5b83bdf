//! Client repository

use crate::domain::{Client, CreateClientInput, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, tenant_id: StringUuid, input: &CreateClientInput) -> Result<Client>;
    async fn find_by_id(&self, tenant_id: StringUuid, id: StringUuid) -> Result<Option<Client>>;
    async fn list_by_tenant(&self, tenant_id: StringUuid) -> Result<Vec<Client>>;
}

pub struct ClientRepositoryImpl {
    pool: MySqlPool,
}

impl ClientRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for ClientRepositoryImpl {
    async fn create(&self, tenant_id: StringUuid, input: &CreateClientInput) -> Result<Client> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO clients (id, tenant_id, name, email, phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .execute(&self.pool)
        .await?;

        self.find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create client")))
    }

    async fn find_by_id(&self, tenant_id: StringUuid, id: StringUuid) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, tenant_id, name, email, phone
            FROM clients
            WHERE tenant_id = ? AND id = ?
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn list_by_tenant(&self, tenant_id: StringUuid) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, tenant_id, name, email, phone
            FROM clients
            WHERE tenant_id = ?
            ORDER BY name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}
