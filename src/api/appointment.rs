//! Appointment API handlers

use crate::api::{LimitQuery, SuccessResponse};
use crate::domain::{AppointmentStatus, ScheduleAppointmentInput, StringUuid};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Schedule an appointment against an estimate
pub async fn schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ScheduleAppointmentInput>,
) -> Result<impl IntoResponse> {
    let appointment = state.appointment_service.schedule(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(appointment))))
}

/// Upcoming scheduled appointments
pub async fn upcoming(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    let appointments = state.appointment_service.upcoming(&auth, query.limit).await?;
    Ok(Json(SuccessResponse::new(appointments)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentStatusBody {
    pub status: AppointmentStatus,
}

/// Complete or cancel an appointment
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(body): Json<UpdateAppointmentStatusBody>,
) -> Result<impl IntoResponse> {
    let appointment = state
        .appointment_service
        .set_status(&auth, id, body.status)
        .await?;
    Ok(Json(SuccessResponse::new(appointment)))
}

/// Record the deposit as collected
pub async fn mark_deposit_paid(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let appointment = state.appointment_service.mark_deposit_paid(&auth, id).await?;
    Ok(Json(SuccessResponse::new(appointment)))
}
