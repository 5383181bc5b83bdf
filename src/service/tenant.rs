//! Tenant business logic

use crate::cache::CacheManager;
use crate::domain::{CreateTenantInput, PriceEntry, StringUuid, Tenant, UpdateTenantSettingsInput};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::TenantRepository;
use std::collections::HashSet;
use std::sync::Arc;
use validator::Validate;

pub struct TenantService<R: TenantRepository> {
    repo: Arc<R>,
    cache: Option<CacheManager>,
    app_base_url: String,
}

impl<R: TenantRepository> TenantService<R> {
    pub fn new(repo: Arc<R>, cache: Option<CacheManager>, app_base_url: String) -> Self {
        Self {
            repo,
            cache,
            app_base_url,
        }
    }

    /// Return the caller's tenant, creating it on first sign-in.
    ///
    /// This is the one operation that runs without an organization on
    /// the token: a brand-new owner has no membership yet. The tenant
    /// id is generated here so the booking QR payload can embed it.
    pub async fn ensure_for_owner(&self, auth: &AuthUser) -> Result<Tenant> {
        if let Some(existing) = self.repo.find_by_owner(&auth.user_id).await? {
            return Ok(existing);
        }

        let id = StringUuid::new_v4();
        let input = CreateTenantInput {
            id,
            name: format!("{}'s Auto Detailing", auth.name),
            owner_user_id: auth.user_id.clone(),
            price_list: vec![],
            cost_of_goods: vec![],
            labor_cost: 0.0,
            qr_payload: format!("{}/book/{}", self.app_base_url, id),
        };
        input.validate()?;

        let tenant = self.repo.create(&input).await?;
        if let Some(cache) = &self.cache {
            let _ = cache.set_tenant(&tenant).await;
        }
        Ok(tenant)
    }

    /// The caller's own tenant record
    pub async fn get(&self, auth: &AuthUser) -> Result<Tenant> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;

        if let Some(cache) = &self.cache {
            if let Ok(Some(tenant)) = cache.get_tenant(*ctx.tenant_id).await {
                return Ok(tenant);
            }
        }

        let tenant = self
            .repo
            .find_by_id(ctx.tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", ctx.tenant_id)))?;

        if let Some(cache) = &self.cache {
            let _ = cache.set_tenant(&tenant).await;
        }
        Ok(tenant)
    }

    /// Update settings (price list, cost of goods, labor cost)
    pub async fn update_settings(
        &self,
        auth: &AuthUser,
        input: UpdateTenantSettingsInput,
    ) -> Result<Tenant> {
        let ctx = policy::authorize(auth, policy::MANAGEMENT)?;
        input.validate()?;
        if let Some(price_list) = &input.price_list {
            validate_price_list(price_list)?;
        }

        let tenant = self.repo.update_settings(ctx.tenant_id, &input).await?;
        if let Some(cache) = &self.cache {
            let _ = cache.invalidate_tenant(*ctx.tenant_id).await;
        }
        Ok(tenant)
    }
}

/// Service names must be unique within a price list, and no configured
/// amount may be negative.
fn validate_price_list(entries: &[PriceEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.service_name.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate service '{}' in price list",
                entry.service_name
            )));
        }
        let m = &entry.size_multiplier;
        if entry.base_price < 0.0 || m.small < 0.0 || m.medium < 0.0 || m.large < 0.0 {
            return Err(AppError::Validation(format!(
                "Negative price configured for service '{}'",
                entry.service_name
            )));
        }
    }
    Ok(())
}
