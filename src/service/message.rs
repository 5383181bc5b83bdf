//! Chat business logic

use crate::domain::{Message, NewMessage, SendMessageInput, StringUuid};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{ClientRepository, MessageRepository};
use std::sync::Arc;

pub struct MessageService<MR: MessageRepository, CR: ClientRepository> {
    message_repo: Arc<MR>,
    client_repo: Arc<CR>,
}

impl<MR: MessageRepository, CR: ClientRepository> MessageService<MR, CR> {
    pub fn new(message_repo: Arc<MR>, client_repo: Arc<CR>) -> Self {
        Self {
            message_repo,
            client_repo,
        }
    }

    /// Append a message to a conversation.
    ///
    /// Whitespace-only content is dropped without an error and without
    /// touching the store; the UI keeps whatever the user typed.
    pub async fn send(&self, auth: &AuthUser, input: SendMessageInput) -> Result<Option<Message>> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;

        if input.content.trim().is_empty() {
            return Ok(None);
        }

        self.client_repo
            .find_by_id(ctx.tenant_id, input.client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", input.client_id)))?;

        let message = self
            .message_repo
            .create(&NewMessage {
                tenant_id: ctx.tenant_id,
                client_id: input.client_id,
                content: input.content,
                sender: input.sender,
            })
            .await?;

        Ok(Some(message))
    }

    /// Full conversation with one client, oldest message first
    pub async fn conversation(&self, auth: &AuthUser, client_id: StringUuid) -> Result<Vec<Message>> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;
        self.message_repo
            .list_conversation(ctx.tenant_id, client_id)
            .await
    }
}
