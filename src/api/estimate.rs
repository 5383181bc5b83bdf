//! Estimate API handlers

use crate::api::{LimitQuery, SuccessResponse};
use crate::domain::{EstimateStatus, GenerateEstimateInput, StringUuid};
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

/// Generate a priced estimate
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateEstimateInput>,
) -> Result<impl IntoResponse> {
    let estimate = state.estimate_service.generate(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(estimate))))
}

/// List the most recent estimates
pub async fn recent(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    let estimates = state.estimate_service.recent(&auth, query.limit).await?;
    Ok(Json(SuccessResponse::new(estimates)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEstimateStatusBody {
    pub status: EstimateStatus,
}

/// Approve or reject an estimate
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(body): Json<UpdateEstimateStatusBody>,
) -> Result<impl IntoResponse> {
    let estimate = state
        .estimate_service
        .set_status(&auth, id, body.status)
        .await?;
    Ok(Json(SuccessResponse::new(estimate)))
}
