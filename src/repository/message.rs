//! Message repository

use crate::domain::{Message, NewMessage, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, input: &NewMessage) -> Result<Message>;
    /// Conversation between one tenant and one client, oldest first
    async fn list_conversation(
        &self,
        tenant_id: StringUuid,
        client_id: StringUuid,
    ) -> Result<Vec<Message>>;
}

pub struct MessageRepositoryImpl {
    pool: MySqlPool,
}

impl MessageRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for MessageRepositoryImpl {
    async fn create(&self, input: &NewMessage) -> Result<Message> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO messages (id, tenant_id, client_id, content, sender, sent_at)
            VALUES (?, ?, ?, ?, ?, NOW(3))
            "#,
        )
        .bind(id)
        .bind(input.tenant_id)
        .bind(input.client_id)
        .bind(&input.content)
        .bind(input.sender)
        .execute(&self.pool)
        .await?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, tenant_id, client_id, content, sender, sent_at
            FROM messages
            WHERE tenant_id = ? AND id = ?
            "#,
        )
        .bind(input.tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        message.ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create message")))
    }

    async fn list_conversation(
        &self,
        tenant_id: StringUuid,
        client_id: StringUuid,
    ) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, tenant_id, client_id, content, sender, sent_at
            FROM messages
            WHERE tenant_id = ? AND client_id = ?
            ORDER BY sent_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_message_repository() {
        let mut mock = MockMessageRepository::new();
        let tenant_id = StringUuid::new_v4();
        let client_id = StringUuid::new_v4();

        mock.expect_list_conversation()
            .with(eq(tenant_id), eq(client_id))
            .returning(|_, _| Ok(vec![]));

        let result = mock.list_conversation(tenant_id, client_id).await.unwrap();
        assert!(result.is_empty());
    }
}
