//! Estimate business logic
//!
//! The total is always computed server-side from the tenant's price
//! list and the vehicle's stored size category; clients never supply a
//! price.

use crate::cache::CacheManager;
use crate::domain::{
    compute_total, Estimate, EstimateStatus, GenerateEstimateInput, NewEstimate, StringUuid, Tenant,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{EstimateRepository, TenantRepository, VehicleRepository};
use std::sync::Arc;

pub struct EstimateService<ER, TR, VR>
where
    ER: EstimateRepository,
    TR: TenantRepository,
    VR: VehicleRepository,
{
    estimate_repo: Arc<ER>,
    tenant_repo: Arc<TR>,
    vehicle_repo: Arc<VR>,
    cache: Option<CacheManager>,
}

impl<ER, TR, VR> EstimateService<ER, TR, VR>
where
    ER: EstimateRepository,
    TR: TenantRepository,
    VR: VehicleRepository,
{
    pub fn new(
        estimate_repo: Arc<ER>,
        tenant_repo: Arc<TR>,
        vehicle_repo: Arc<VR>,
        cache: Option<CacheManager>,
    ) -> Self {
        Self {
            estimate_repo,
            tenant_repo,
            vehicle_repo,
            cache,
        }
    }

    async fn load_tenant(&self, tenant_id: StringUuid) -> Result<Tenant> {
        if let Some(cache) = &self.cache {
            if let Ok(Some(tenant)) = cache.get_tenant(*tenant_id).await {
                return Ok(tenant);
            }
        }
        let tenant = self
            .tenant_repo
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", tenant_id)))?;
        if let Some(cache) = &self.cache {
            let _ = cache.set_tenant(&tenant).await;
        }
        Ok(tenant)
    }

    /// Price the requested services and persist the resulting quote
    pub async fn generate(&self, auth: &AuthUser, input: GenerateEstimateInput) -> Result<Estimate> {
        let ctx = policy::authorize(auth, policy::STAFF)?;

        let tenant = self.load_tenant(ctx.tenant_id).await?;
        let vehicle = self
            .vehicle_repo
            .find_by_id(ctx.tenant_id, input.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", input.vehicle_id)))?;

        if vehicle.client_id != input.client_id {
            return Err(AppError::Validation(
                "Vehicle does not belong to the given client".to_string(),
            ));
        }

        let total_price = compute_total(&tenant.price_list, &input.services, vehicle.size)?;

        self.estimate_repo
            .create(&NewEstimate {
                tenant_id: ctx.tenant_id,
                client_id: input.client_id,
                vehicle_id: input.vehicle_id,
                services: input.services,
                total_price,
                status: EstimateStatus::Pending,
            })
            .await
    }

    /// Most recent estimates for the caller's tenant
    pub async fn recent(&self, auth: &AuthUser, limit: i64) -> Result<Vec<Estimate>> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        self.estimate_repo.list_recent(ctx.tenant_id, limit).await
    }

    /// Approve or reject a pending estimate
    pub async fn set_status(
        &self,
        auth: &AuthUser,
        id: StringUuid,
        status: EstimateStatus,
    ) -> Result<Estimate> {
        let ctx = policy::authorize(auth, policy::MANAGEMENT)?;

        if status == EstimateStatus::Pending {
            return Err(AppError::Validation(
                "Estimate status can only be set to approved or rejected".to_string(),
            ));
        }

        self.estimate_repo
            .update_status(ctx.tenant_id, id, status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrgRole, PriceEntry, SizeMultiplier, Vehicle, VehicleSize};
    use crate::repository::estimate::MockEstimateRepository;
    use crate::repository::tenant::MockTenantRepository;
    use crate::repository::vehicle::MockVehicleRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn staff_user(tenant_id: StringUuid) -> AuthUser {
        AuthUser {
            user_id: "user_staff".to_string(),
            tenant_id: Some(tenant_id),
            role: Some(OrgRole::Member),
            email: "staff@example.com".to_string(),
            name: "Staff".to_string(),
        }
    }

    fn tenant_with_wash(id: StringUuid) -> Tenant {
        Tenant {
            id,
            name: "Shine Bros".to_string(),
            owner_user_id: "user_owner".to_string(),
            price_list: vec![PriceEntry {
                service_name: "wash".to_string(),
                base_price: 50.0,
                size_multiplier: SizeMultiplier {
                    small: 1.0,
                    medium: 1.5,
                    large: 2.0,
                },
            }],
            cost_of_goods: vec![],
            labor_cost: 0.0,
            qr_payload: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn vehicle_fixture(tenant_id: StringUuid, client_id: StringUuid, size: VehicleSize) -> Vehicle {
        Vehicle {
            id: StringUuid::new_v4(),
            tenant_id,
            client_id,
            make: "Ford".to_string(),
            model: "F-150".to_string(),
            year: 2020,
            size,
        }
    }

    fn estimate_from(input: &NewEstimate) -> Estimate {
        Estimate {
            id: StringUuid::new_v4(),
            tenant_id: input.tenant_id,
            client_id: input.client_id,
            vehicle_id: input.vehicle_id,
            services: input.services.clone(),
            total_price: input.total_price,
            status: input.status,
            created_at: Utc::now(),
        }
    }

    fn service(
        estimate_repo: MockEstimateRepository,
        tenant_repo: MockTenantRepository,
        vehicle_repo: MockVehicleRepository,
    ) -> EstimateService<MockEstimateRepository, MockTenantRepository, MockVehicleRepository> {
        EstimateService::new(
            Arc::new(estimate_repo),
            Arc::new(tenant_repo),
            Arc::new(vehicle_repo),
            None,
        )
    }

    #[tokio::test]
    async fn test_generate_prices_large_wash_at_double() {
        let tenant_id = StringUuid::new_v4();
        let client_id = StringUuid::new_v4();
        let vehicle = vehicle_fixture(tenant_id, client_id, VehicleSize::Large);
        let vehicle_id = vehicle.id;

        let mut tenant_repo = MockTenantRepository::new();
        tenant_repo
            .expect_find_by_id()
            .with(eq(tenant_id))
            .returning(move |id| Ok(Some(tenant_with_wash(id))));

        let mut vehicle_repo = MockVehicleRepository::new();
        let vehicle_clone = vehicle.clone();
        vehicle_repo
            .expect_find_by_id()
            .with(eq(tenant_id), eq(vehicle_id))
            .returning(move |_, _| Ok(Some(vehicle_clone.clone())));

        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo
            .expect_create()
            .withf(move |input: &NewEstimate| {
                input.tenant_id == tenant_id
                    && input.total_price == 100.0
                    && input.status == EstimateStatus::Pending
            })
            .returning(|input| Ok(estimate_from(input)));

        let input = GenerateEstimateInput {
            client_id,
            vehicle_id,
            services: vec!["wash".to_string()],
        };
        let estimate = service(estimate_repo, tenant_repo, vehicle_repo)
            .generate(&staff_user(tenant_id), input)
            .await
            .unwrap();
        assert_eq!(estimate.total_price, 100.0);
    }

    #[tokio::test]
    async fn test_generate_is_deterministic_across_calls() {
        let tenant_id = StringUuid::new_v4();
        let client_id = StringUuid::new_v4();
        let vehicle = vehicle_fixture(tenant_id, client_id, VehicleSize::Large);
        let vehicle_id = vehicle.id;

        let mut tenant_repo = MockTenantRepository::new();
        tenant_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(tenant_with_wash(id))));
        let mut vehicle_repo = MockVehicleRepository::new();
        let vehicle_clone = vehicle.clone();
        vehicle_repo
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(vehicle_clone.clone())));
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo
            .expect_create()
            .times(2)
            .returning(|input| Ok(estimate_from(input)));

        let svc = service(estimate_repo, tenant_repo, vehicle_repo);
        let user = staff_user(tenant_id);
        for _ in 0..2 {
            let input = GenerateEstimateInput {
                client_id,
                vehicle_id,
                services: vec!["wash".to_string()],
            };
            let estimate = svc.generate(&user, input).await.unwrap();
            assert_eq!(estimate.total_price, 100.0);
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_unlisted_service() {
        let tenant_id = StringUuid::new_v4();
        let client_id = StringUuid::new_v4();
        let vehicle = vehicle_fixture(tenant_id, client_id, VehicleSize::Small);
        let vehicle_id = vehicle.id;

        let mut tenant_repo = MockTenantRepository::new();
        tenant_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(tenant_with_wash(id))));
        let mut vehicle_repo = MockVehicleRepository::new();
        let vehicle_clone = vehicle.clone();
        vehicle_repo
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(vehicle_clone.clone())));
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo.expect_create().times(0);

        let input = GenerateEstimateInput {
            client_id,
            vehicle_id,
            services: vec!["undercoating".to_string()],
        };
        let err = service(estimate_repo, tenant_repo, vehicle_repo)
            .generate(&staff_user(tenant_id), input)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_denied_without_staff_role() {
        let tenant_id = StringUuid::new_v4();
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo.expect_create().times(0);

        let mut customer = staff_user(tenant_id);
        customer.role = Some(OrgRole::Client);

        let input = GenerateEstimateInput {
            client_id: StringUuid::new_v4(),
            vehicle_id: StringUuid::new_v4(),
            services: vec![],
        };
        let err = service(
            estimate_repo,
            MockTenantRepository::new(),
            MockVehicleRepository::new(),
        )
        .generate(&customer, input)
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_recent_queries_callers_tenant() {
        let tenant_id = StringUuid::new_v4();
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo
            .expect_list_recent()
            .with(eq(tenant_id), eq(10))
            .returning(|_, _| Ok(vec![]));

        let result = service(
            estimate_repo,
            MockTenantRepository::new(),
            MockVehicleRepository::new(),
        )
        .recent(&staff_user(tenant_id), 10)
        .await
        .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_set_status_requires_manager() {
        let tenant_id = StringUuid::new_v4();
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo.expect_update_status().times(0);

        let err = service(
            estimate_repo,
            MockTenantRepository::new(),
            MockVehicleRepository::new(),
        )
        .set_status(
            &staff_user(tenant_id),
            StringUuid::new_v4(),
            EstimateStatus::Approved,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_set_status_rejects_pending_target() {
        let tenant_id = StringUuid::new_v4();
        let mut estimate_repo = MockEstimateRepository::new();
        estimate_repo.expect_update_status().times(0);

        let mut manager = staff_user(tenant_id);
        manager.role = Some(OrgRole::Manager);

        let err = service(
            estimate_repo,
            MockTenantRepository::new(),
            MockVehicleRepository::new(),
        )
        .set_status(&manager, StringUuid::new_v4(), EstimateStatus::Pending)
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
