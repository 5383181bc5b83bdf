//! Shop-floor (ongoing service) API handlers

use crate::api::SuccessResponse;
use crate::domain::{JobStatus, StartServiceInput, StringUuid};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Start a job
pub async fn start(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<StartServiceInput>,
) -> Result<impl IntoResponse> {
    let job = state.workshop_service.start_service(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(job))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusBody {
    pub status: JobStatus,
}

/// Update a job's status
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(body): Json<UpdateJobStatusBody>,
) -> Result<impl IntoResponse> {
    let job = state
        .workshop_service
        .update_status(&auth, id, body.status)
        .await?;
    Ok(Json(SuccessResponse::new(job)))
}

/// Jobs currently in progress
pub async fn in_progress(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let jobs = state.workshop_service.in_progress(&auth).await?;
    Ok(Json(SuccessResponse::new(jobs)))
}
