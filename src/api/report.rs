//! Service report API handlers

use crate::api::SuccessResponse;
use crate::domain::{GenerateReportInput, StringUuid};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Generate a service report document for an assessment
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateReportInput>,
) -> Result<impl IntoResponse> {
    let report = state.report_service.generate(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(report))))
}

/// Fetch a report with its document URL
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let view = state.report_service.get(&auth, id).await?;
    Ok(Json(SuccessResponse::new(view)))
}
