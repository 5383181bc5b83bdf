//! Chat message domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which side of the conversation sent the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Tenant,
    Client,
}

impl std::str::FromStr for MessageSender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tenant" => Ok(MessageSender::Tenant),
            "client" => Ok(MessageSender::Client),
            _ => Err(format!("Unknown message sender: {}", s)),
        }
    }
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSender::Tenant => write!(f, "tenant"),
            MessageSender::Client => write!(f, "client"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for MessageSender {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for MessageSender {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for MessageSender {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> std::result::Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Append-only chat message between a tenant and one of its clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub content: String,
    pub sender: MessageSender,
    pub sent_at: DateTime<Utc>,
}

/// Request body for sending a message
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageInput {
    pub client_id: StringUuid,
    pub content: String,
    pub sender: MessageSender,
}

/// Fully-resolved row handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub tenant_id: StringUuid,
    pub client_id: StringUuid,
    pub content: String,
    pub sender: MessageSender,
}
