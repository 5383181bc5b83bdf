//! Shop-floor (ongoing service) business logic

use crate::domain::{JobStatus, NewOngoingService, OngoingService, StartServiceInput, StringUuid};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{OngoingServiceRepository, VehicleRepository};
use chrono::{Duration, Utc};
use std::sync::Arc;
use validator::Validate;

pub struct WorkshopService<OR: OngoingServiceRepository, VR: VehicleRepository> {
    ongoing_repo: Arc<OR>,
    vehicle_repo: Arc<VR>,
}

impl<OR: OngoingServiceRepository, VR: VehicleRepository> WorkshopService<OR, VR> {
    pub fn new(ongoing_repo: Arc<OR>, vehicle_repo: Arc<VR>) -> Self {
        Self {
            ongoing_repo,
            vehicle_repo,
        }
    }

    /// Put a job on the floor
    pub async fn start_service(
        &self,
        auth: &AuthUser,
        input: StartServiceInput,
    ) -> Result<OngoingService> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        input.validate()?;

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

        let started_at = Utc::now();
        let estimated_end_at = started_at + Duration::minutes(input.estimated_duration_minutes);

        self.ongoing_repo
            .create(&NewOngoingService {
                tenant_id: ctx.tenant_id,
                client_id: input.client_id,
                vehicle_id: input.vehicle_id,
                service_name: input.service_name,
                assigned_staff: input.assigned_staff,
                started_at,
                estimated_end_at,
            })
            .await
    }

    /// Close out (or reopen) a job
    pub async fn update_status(
        &self,
        auth: &AuthUser,
        id: StringUuid,
        status: JobStatus,
    ) -> Result<OngoingService> {
        let ctx = policy::authorize(auth, policy::MANAGEMENT)?;
        self.ongoing_repo.update_status(ctx.tenant_id, id, status).await
    }

    /// Jobs currently in progress for the caller's tenant
    pub async fn in_progress(&self, auth: &AuthUser) -> Result<Vec<OngoingService>> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        self.ongoing_repo.list_in_progress(ctx.tenant_id).await
    }
}
