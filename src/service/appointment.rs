//! Appointment scheduling business logic

use crate::domain::{
    appointment_end, Appointment, AppointmentStatus, NewAppointment, ScheduleAppointmentInput,
    StringUuid,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{AppointmentRepository, EstimateRepository};
use chrono::Utc;
use std::sync::Arc;

pub struct AppointmentService<AR: AppointmentRepository, ER: EstimateRepository> {
    appointment_repo: Arc<AR>,
    estimate_repo: Arc<ER>,
}

impl<AR: AppointmentRepository, ER: EstimateRepository> AppointmentService<AR, ER> {
    pub fn new(appointment_repo: Arc<AR>, estimate_repo: Arc<ER>) -> Self {
        Self {
            appointment_repo,
            estimate_repo,
        }
    }

    /// Book a two-hour slot against an estimate.
    ///
    /// The parent estimate must exist and belong to the caller's
    /// tenant; a cross-tenant estimate id is rejected before any row is
    /// written.
    pub async fn schedule(
        &self,
        auth: &AuthUser,
        input: ScheduleAppointmentInput,
    ) -> Result<Appointment> {
        let ctx = policy::authorize(auth, policy::STAFF)?;

        let estimate = self
            .estimate_repo
            .find_by_id(input.estimate_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Estimate {} not found", input.estimate_id))
            })?;

        if estimate.tenant_id != ctx.tenant_id {
            return Err(AppError::Forbidden(
                "Estimate belongs to another tenant".to_string(),
            ));
        }

        self.appointment_repo
            .create(&NewAppointment {
                tenant_id: ctx.tenant_id,
                estimate_id: input.estimate_id,
                start_time: input.start_time,
                end_time: appointment_end(input.start_time),
            })
            .await
    }

    /// Scheduled appointments starting after now, soonest first
    pub async fn upcoming(&self, auth: &AuthUser, limit: i64) -> Result<Vec<Appointment>> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        self.appointment_repo
            .list_upcoming(ctx.tenant_id, Utc::now(), limit)
            .await
    }

    /// Complete or cancel an appointment
    pub async fn set_status(
        &self,
        auth: &AuthUser,
        id: StringUuid,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let ctx = policy::authorize(auth, policy::MANAGEMENT)?;
        self.appointment_repo
            .update_status(ctx.tenant_id, id, status)
            .await
    }

    /// Record that the deposit for an appointment was collected
    pub async fn mark_deposit_paid(&self, auth: &AuthUser, id: StringUuid) -> Result<Appointment> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        self.appointment_repo
            .set_deposit_paid(ctx.tenant_id, id, true)
            .await
    }
}
