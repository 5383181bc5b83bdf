//! REST API shared utilities (response envelopes, query types)

pub mod appointment;
pub mod assessment;
pub mod client;
pub mod estimate;
pub mod health;
pub mod message;
pub mod portal;
pub mod report;
pub mod tenant;
pub mod workshop;

use serde::{Deserialize, Serialize};

/// Maximum allowed limit for list queries
pub(crate) const MAX_LIMIT: i64 = 50;

/// Limit query parameter for recent/upcoming listings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    10
}

/// Reject limit values less than 1, clamp to MAX_LIMIT
pub(crate) fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "limit must be a positive integer (>= 1)",
        ));
    }
    Ok(value.min(MAX_LIMIT))
}

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for no-op outcomes, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_query_default() {
        let query: LimitQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_limit_query_clamped_to_max() {
        let query: LimitQuery = serde_json::from_str(r#"{"limit": 100000}"#).unwrap();
        assert_eq!(query.limit, MAX_LIMIT);
    }

    #[test]
    fn test_limit_query_rejects_non_positive() {
        assert!(serde_json::from_str::<LimitQuery>(r#"{"limit": 0}"#).is_err());
        assert!(serde_json::from_str::<LimitQuery>(r#"{"limit": -3}"#).is_err());
    }

    #[test]
    fn test_success_response() {
        let response = SuccessResponse::new("ok");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"data":"ok"}"#);
    }

    #[test]
    fn test_message_response() {
        let response = MessageResponse::new("Message dropped");
        assert_eq!(response.message, "Message dropped");
    }
}
