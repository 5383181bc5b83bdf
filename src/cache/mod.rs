//! Redis cache layer
//!
//! Tenant records (price list, labor cost) are read on almost every
//! estimate, so they are cached with a short TTL and invalidated on
//! settings writes.

use crate::config::RedisConfig;
use crate::domain::Tenant;
use crate::error::{AppError, Result};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use uuid::Uuid;

/// Cache key prefixes
mod keys {
    pub const TENANT: &str = "slicks:tenant";
}

/// Default TTLs
mod ttl {
    pub const TENANT_SECS: u64 = 600; // 10 minutes
}

/// Cache manager for Redis operations
#[derive(Clone)]
pub struct CacheManager {
    conn: ConnectionManager,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }

    /// Liveness probe for the readiness endpoint
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Get a cached tenant record
    pub async fn get_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>> {
        let mut conn = self.conn.clone();
        let key = format!("{}:{}", keys::TENANT, tenant_id);
        let value: Option<String> = conn.get(&key).await?;

        match value {
            Some(v) => {
                let parsed = serde_json::from_str(&v).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Cache deserialize error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Cache a tenant record
    pub async fn set_tenant(&self, tenant: &Tenant) -> Result<()> {
        let mut conn = self.conn.clone();
        let key = format!("{}:{}", keys::TENANT, tenant.id);
        let serialized = serde_json::to_string(tenant)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Cache serialize error: {}", e)))?;
        let _: () = conn
            .set_ex(
                &key,
                serialized,
                Duration::from_secs(ttl::TENANT_SECS).as_secs(),
            )
            .await?;
        Ok(())
    }

    /// Invalidate a cached tenant record
    pub async fn invalidate_tenant(&self, tenant_id: Uuid) -> Result<()> {
        let mut conn = self.conn.clone();
        let key = format!("{}:{}", keys::TENANT, tenant_id);
        let _: () = conn.del(&key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let tenant_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let key = format!("{}:{}", keys::TENANT, tenant_id);
        assert_eq!(key, "slicks:tenant:550e8400-e29b-41d4-a716-446655440000");
    }
}
